use ndarray::{ArrayView1, ArrayView2, s};
use teamreduce::{Error, Executor, LaunchConfig, SerialExecutor, ThreadExecutor};

mod common;
use common::{BACKENDS, init_logging, reduce_with, reference_reduce};

fn add(a: i64, b: i64) -> i64 {
    a + b
}

fn concat(a: String, b: String) -> String {
    a + &b
}

#[test]
fn concrete_scenarios() {
    init_logging();
    for backend in BACKENDS {
        let input: Vec<i64> = (1..=9).collect();
        assert_eq!(reduce_with(backend, 4, 2, &input, 0, add), 45);

        let empty: [i64; 0] = [];
        assert_eq!(reduce_with(backend, 3, 1, &empty, 100, add), 100);
    }
}

#[test]
fn empty_input_returns_init() {
    for backend in BACKENDS {
        let empty: [&str; 0] = [];
        let out = reduce_with(backend, 5, 3, &empty, String::from("init"), concat);
        assert_eq!(out, "init");
    }
}

#[test]
fn singleton() {
    // subtraction lets us check that the result is op(init, a0) and not
    // op(a0, init)
    for backend in BACKENDS {
        for (group_size, grain_size) in [(1, 1), (4, 2), (7, 3)] {
            let out = reduce_with(backend, group_size, grain_size, &[3_i64], 10_i64, |a, b| a - b);
            assert_eq!(out, 7);
        }
    }
}

#[test]
fn odd_group_sizes() {
    // with fewer elements than members, every live value must be accounted
    // for exactly once across the tree rounds
    for backend in BACKENDS {
        for group_size in [3, 5, 6, 7, 13] {
            for n in 1..=group_size {
                let input: Vec<i64> = (1..=(n as i64)).map(|x| x * x).collect();
                let expected: i64 = 17 + input.iter().sum::<i64>();
                let out = reduce_with(backend, group_size, 1, &input, 17, add);
                assert_eq!(out, expected, "group_size = {group_size}, n = {n}");
            }
        }
    }
}

#[test]
fn boundary_tile() {
    for backend in BACKENDS {
        for (group_size, grain_size) in [(4, 2), (3, 5), (8, 1)] {
            let tile_len = group_size * grain_size;
            for k in 0..3 {
                let input: Vec<i64> = (0..(k * tile_len + 1) as i64).map(|x| 2 * x + 1).collect();
                let expected: i64 = input.iter().sum();
                let out = reduce_with(backend, group_size, grain_size, &input, 0, add);
                assert_eq!(out, expected);
            }
        }
    }
}

#[test]
fn full_tiles_match_sequential_fold() {
    for backend in BACKENDS {
        let (group_size, grain_size) = (6, 4);
        let input: Vec<i64> = (0..(3 * group_size * grain_size) as i64)
            .map(|x| (x * 37) % 101 - 50)
            .collect();
        let init: i64 = 1000;
        let expected = input.iter().fold(init, |a, &b| a + b);
        assert_eq!(
            reduce_with(backend, group_size, grain_size, &input, init, add),
            expected
        );
        let expected = input.iter().fold(init, |a, &b| a.max(b));
        assert_eq!(
            reduce_with(backend, group_size, grain_size, &input, init, i64::max),
            expected
        );
    }
}

#[test]
fn identity_init() {
    for backend in BACKENDS {
        let input: Vec<i64> = vec![3, -1, 4, 1, -5, 9, 2, 6, -5, 3, 5];
        assert_eq!(reduce_with(backend, 4, 3, &input, 0, add), 22);
        assert_eq!(reduce_with(backend, 4, 3, &input, 1_i64, |a, b| a * b), -486000);
        assert_eq!(reduce_with(backend, 4, 3, &input, i64::MIN, i64::max), 9);
        assert_eq!(reduce_with(backend, 4, 3, &input, i64::MAX, i64::min), -5);
    }
}

#[test]
fn divide_and_conquer_order() {
    // string concatenation is associative, but not commutative. The result
    // exposes the order in which the partial values were combined.
    for backend in BACKENDS {
        let letters = ["a", "b", "c", "d"];
        let out = reduce_with(backend, 4, 1, &letters, String::new(), concat);
        assert_eq!(out, "adbc");

        // member 0 holds "ae", member 1 holds "bf", member 2 holds "c" and
        // member 3 holds "d"
        let letters = ["a", "b", "c", "d", "e", "f"];
        let out = reduce_with(backend, 4, 2, &letters, String::from("x"), concat);
        assert_eq!(out, "xaedbfc");

        // the middle value is carried forward when the live-count is odd
        let letters = ["a", "b", "c"];
        let out = reduce_with(backend, 3, 1, &letters, String::new(), concat);
        assert_eq!(out, "acb");
    }
}

#[test]
fn matches_reference_order() {
    let letters: Vec<String> = (0..61_u8)
        .map(|i| char::from(b'0' + (i % 75)).to_string())
        .collect();
    for backend in BACKENDS {
        for (group_size, grain_size) in [(1, 4), (2, 3), (5, 2), (7, 7), (16, 1), (64, 2)] {
            for n in [0, 1, 2, 6, 17, 40, 61] {
                let expected =
                    reference_reduce(&letters[..n], group_size, String::from("#"), concat);
                let out = reduce_with(
                    backend,
                    group_size,
                    grain_size,
                    &letters[..n],
                    String::from("#"),
                    concat,
                );
                assert_eq!(out, expected, "group_size = {group_size}, n = {n}");
            }
        }
    }
}

#[test]
fn elements_convert_into_result_type() {
    // the elements are i32 while the reduction is carried out with i64 (the
    // sum overflows an i32)
    let input: Vec<i32> = vec![i32::MAX; 10];
    for backend in BACKENDS {
        let out: i64 = reduce_with(backend, 3, 2, &input, 0_i64, add);
        assert_eq!(out, 10 * (i32::MAX as i64));
    }
}

#[test]
fn strided_array_input() {
    #[rustfmt::skip]
    let buf = [
        1.0, 10.0,
        2.0, 20.0,
        3.0, 30.0,
        4.0, 40.0,
        5.0, 50.0,
    ];
    let arr = ArrayView2::from_shape((5, 2), &buf).unwrap();
    let col: ArrayView1<f64> = arr.slice_move(s![.., 1]);

    let config = LaunchConfig::new(2, 2).unwrap();
    let out = SerialExecutor::new(config).reduce(&col, 0.5_f64, |a, b| a + b);
    assert_eq!(out, Ok(150.5));
    let out = ThreadExecutor::new(config).reduce(&col, 0.5_f64, |a, b| a + b);
    assert_eq!(out, Ok(150.5));
}

#[test]
fn every_member_gets_result() {
    init_logging();
    let input: Vec<i64> = (0..1000).collect();
    let config = LaunchConfig::new(9, 4).unwrap();

    let per_member = ThreadExecutor::new(config)
        .reduce_per_member(&input[..], 0, add)
        .unwrap();
    assert_eq!(per_member, vec![499500; 9]);

    let per_member = SerialExecutor::new(config)
        .reduce_per_member(&input[..], 0, add)
        .unwrap();
    assert_eq!(per_member, vec![499500; 9]);
}

#[test]
fn extra_scratch_memory() {
    let config = LaunchConfig::builder()
        .group_size(3)
        .grain_size(2)
        .scratch_slots(10)
        .build()
        .unwrap();
    let input: Vec<i64> = (1..=20).collect();
    assert_eq!(SerialExecutor::new(config).reduce(&input[..], 0, add), Ok(210));
    assert_eq!(ThreadExecutor::new(config).reduce(&input[..], 0, add), Ok(210));
}

#[test]
fn launch_config_errors() {
    assert!(matches!(LaunchConfig::new(0, 1), Err(Error::GroupParam(_))));
    assert!(matches!(
        LaunchConfig::builder().group_size(4).scratch_slots(2).build(),
        Err(Error::ScratchTooSmall {
            required: 4,
            available: 2
        })
    ));
}
