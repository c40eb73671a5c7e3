//! Configuration of a group launch
//!
//! All of the error-checking happens while building a [`LaunchConfig`]. The
//! idea is that once a backend holds a valid configuration, the collective
//! code executed by the members never needs to handle errors.

use crate::error::Error;
use teamreduce_nostd_internal::GroupParam;

/// A validated description of the group that a backend launches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchConfig {
    param: GroupParam,
    scratch_slots: usize,
}

impl LaunchConfig {
    pub fn builder() -> LaunchConfigBuilder {
        LaunchConfigBuilder::new()
    }

    /// Shorthand for a config with the default amount of scratch memory
    pub fn new(group_size: usize, grain_size: usize) -> Result<Self, Error> {
        Self::builder()
            .group_size(group_size)
            .grain_size(grain_size)
            .build()
    }

    pub fn param(&self) -> &GroupParam {
        &self.param
    }

    pub fn group_size(&self) -> usize {
        self.param.group_size()
    }

    pub fn grain_size(&self) -> usize {
        self.param.grain_size()
    }

    /// The number of scratch slots that a backend allocates for the group
    pub fn scratch_slots(&self) -> usize {
        self.scratch_slots
    }
}

#[derive(Clone, Debug)]
pub struct LaunchConfigBuilder {
    group_size: usize,
    grain_size: usize,
    scratch_slots: Option<usize>,
}

impl Default for LaunchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LaunchConfigBuilder {
    pub fn new() -> Self {
        LaunchConfigBuilder {
            group_size: 1,
            grain_size: 1,
            scratch_slots: None,
        }
    }

    pub fn group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    pub fn grain_size(mut self, grain_size: usize) -> Self {
        self.grain_size = grain_size;
        self
    }

    /// Override the number of scratch slots. When this isn't called, we
    /// allocate exactly 1 slot per member.
    pub fn scratch_slots(mut self, scratch_slots: usize) -> Self {
        self.scratch_slots = Some(scratch_slots);
        self
    }

    pub fn build(self) -> Result<LaunchConfig, Error> {
        let param = GroupParam::new(self.group_size, self.grain_size).map_err(Error::GroupParam)?;
        let scratch_slots = self.scratch_slots.unwrap_or(param.group_size());
        if scratch_slots < param.group_size() {
            return Err(Error::ScratchTooSmall {
                required: param.group_size(),
                available: scratch_slots,
            });
        }
        Ok(LaunchConfig {
            param,
            scratch_slots,
        })
    }
}
