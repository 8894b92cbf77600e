//! Flash images: building, validating and opening them.
//!
//! [`FlashImage`] is the fallible boundary of the crate. It owns a region and
//! the configuration it was opened with, and hands out views either
//! unchecked ([`FlashImage::at`]) or after validating the record
//! ([`FlashImage::get`]).

pub mod builder;
pub mod validate;

pub use builder::ImageBuilder;
pub use validate::{
    check_bounds, validate_container, validate_map, validate_record, validate_vector, RecordInfo,
};

use crate::config::FlashConfig;
use crate::error::Result;
use crate::log_error;
use crate::memory::{FlashMemory, MemoryFlash, MmapFlash};
use crate::object::element::FlashObject;
use crate::object::types::FlashAddr;
use crate::object::view::ObjectView;
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, warn};

/// A flash region together with its configuration.
pub struct FlashImage {
    flash: Box<dyn FlashMemory>,
    config: FlashConfig,
}

impl FlashImage {
    /// Map an image file at `config.base_address`.
    pub fn open<P: AsRef<Path>>(path: P, config: FlashConfig) -> Result<Self> {
        config.validate()?;
        let flash = MmapFlash::open(path, &config)?;
        info!(
            region = flash.name(),
            base = config.base_address,
            size = flash.len(),
            "Flash image opened"
        );
        Ok(Self {
            flash: Box::new(flash),
            config,
        })
    }

    /// Wrap an in-memory region, typically produced by an [`ImageBuilder`].
    pub fn from_memory(flash: MemoryFlash, config: FlashConfig) -> Result<Self> {
        config.validate()?;
        if flash.base_address() != config.base_address {
            warn!(
                region = flash.name(),
                region_base = flash.base_address(),
                config_base = config.base_address,
                "Region base differs from configured base address"
            );
        }
        debug!(region = flash.name(), fingerprint = %flash.fingerprint(), "Flash image attached");
        Ok(Self {
            flash: Box::new(flash),
            config,
        })
    }

    pub fn flash(&self) -> &dyn FlashMemory {
        self.flash.as_ref()
    }

    pub fn config(&self) -> &FlashConfig {
        &self.config
    }

    /// View of the record at `addr` without any checks.
    pub fn at<'f, O: FlashObject<'f>>(&'f self, addr: FlashAddr) -> O {
        O::at(self.flash.as_ref(), addr)
    }

    /// View of the record at `addr`, validated first unless
    /// `validate_on_access` is disabled.
    pub fn get<'f, O: ObjectView<'f>>(&'f self, addr: FlashAddr) -> Result<O> {
        if self.config.validate_on_access {
            let _span = crate::span_trace!("validate", addr = addr).entered();
            validate_container::<O>(self.flash.as_ref(), addr).map_err(|e| log_error!(e))?;
        }
        Ok(O::at(self.flash.as_ref(), addr))
    }

    /// Validate many records in parallel.
    ///
    /// Results are returned in the order of `addrs`.
    pub fn validate_records(&self, addrs: &[FlashAddr]) -> Vec<Result<RecordInfo>> {
        let flash = self.flash.as_ref();
        addrs
            .par_iter()
            .map(|&addr| validate_record(flash, addr))
            .collect()
    }
}

impl std::fmt::Debug for FlashImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashImage")
            .field("region", &self.flash.name())
            .field("base", &self.flash.base_address())
            .field("len", &self.flash.len())
            .field("config", &self.config)
            .finish()
    }
}
