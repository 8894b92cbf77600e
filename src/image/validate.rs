//! Structural checks for records placed by external tooling.
//!
//! Views trust the layout and never fail. These checks are the fallible
//! counterpart, run once at the boundary before views are handed out.

use crate::error::{FlashError, Result};
use crate::memory::FlashMemory;
use crate::object::element::Element;
use crate::object::read::read_value;
use crate::object::types::{FlashAddr, Header, COPY_BIT, HEADER_SIZE, NULL_ADDR};
use crate::object::utils::is_aligned;
use crate::object::view::ObjectView;
use crate::object::{FlashString, Map, Vector};
use serde::Serialize;

/// Summary of a record that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordInfo {
    /// Address that was validated.
    pub addr: FlashAddr,
    /// Address of the record holding the payload; differs from `addr` for
    /// indirection records.
    pub target: FlashAddr,
    /// Payload length in bytes.
    pub length: u32,
    pub is_copy: bool,
}

/// Check that `[addr, addr + len)` lies inside the region.
pub fn check_bounds(flash: &dyn FlashMemory, addr: FlashAddr, len: usize) -> Result<()> {
    if flash.contains(addr, len) {
        Ok(())
    } else {
        Err(FlashError::OutOfBounds {
            addr,
            len,
            region: flash.name().to_string(),
        })
    }
}

fn check_not_null(flash: &dyn FlashMemory, addr: FlashAddr) -> Result<()> {
    if addr == NULL_ADDR {
        return Err(FlashError::OutOfBounds {
            addr,
            len: HEADER_SIZE as usize,
            region: flash.name().to_string(),
        });
    }
    Ok(())
}

/// Header and payload of a non-indirection record at `addr`.
fn check_direct(flash: &dyn FlashMemory, addr: FlashAddr) -> Result<u32> {
    if !is_aligned(addr) {
        return Err(FlashError::Misaligned { addr });
    }
    check_bounds(flash, addr, HEADER_SIZE as usize)?;
    let word = read_value::<u32>(flash, addr);
    let length = match Header::from(word) {
        Header::Length(length) => length,
        Header::Indirect(target) => {
            return Err(FlashError::ChainedIndirection { addr, target });
        }
    };
    let end = addr as u64 + HEADER_SIZE as u64 + length as u64;
    if end > COPY_BIT as u64 {
        return Err(FlashError::LengthOverflow { addr, word });
    }
    check_bounds(flash, addr + HEADER_SIZE, length as usize)?;
    Ok(length)
}

/// Validate the record at `addr`, following one level of indirection.
///
/// The null address never holds a record and is reported as out of bounds.
pub fn validate_record(flash: &dyn FlashMemory, addr: FlashAddr) -> Result<RecordInfo> {
    check_not_null(flash, addr)?;
    if !is_aligned(addr) {
        return Err(FlashError::Misaligned { addr });
    }
    check_bounds(flash, addr, HEADER_SIZE as usize)?;

    match Header::from(read_value::<u32>(flash, addr)) {
        Header::Length(_) => Ok(RecordInfo {
            addr,
            target: addr,
            length: check_direct(flash, addr)?,
            is_copy: false,
        }),
        Header::Indirect(target) => {
            check_not_null(flash, target)?;
            let length = match check_direct(flash, target) {
                Err(FlashError::ChainedIndirection { .. }) => {
                    return Err(FlashError::ChainedIndirection { addr, target });
                }
                other => other?,
            };
            Ok(RecordInfo {
                addr,
                target,
                length,
                is_copy: true,
            })
        }
    }
}

/// Validate a record as a container of `V::Element`.
///
/// The payload must be a whole number of elements, and every reference slot
/// must be null or point at a valid record. Referenced records are not
/// descended into.
pub fn validate_container<'f, V: ObjectView<'f>>(
    flash: &'f dyn FlashMemory,
    addr: FlashAddr,
) -> Result<RecordInfo> {
    let info = validate_record(flash, addr)?;
    let element_size = <V::Element as Element<'f>>::SIZE;
    if info.length as usize % element_size != 0 {
        return Err(FlashError::ElementMismatch {
            addr: info.target,
            length: info.length,
            element_size,
        });
    }
    let data = info.target + HEADER_SIZE;
    for index in 0..info.length as usize / element_size {
        <V::Element as Element<'f>>::check_slot(flash, data + (index * element_size) as u32)?;
    }
    Ok(info)
}

/// Validate a vector whatever its element type.
pub fn validate_vector(flash: &dyn FlashMemory, addr: FlashAddr) -> Result<RecordInfo> {
    validate_container::<Vector<'_, FlashString<'_>>>(flash, addr)
}

/// Validate a map whose key and content slots are both references.
pub fn validate_map(flash: &dyn FlashMemory, addr: FlashAddr) -> Result<RecordInfo> {
    validate_container::<Map<'_, FlashString<'_>, FlashString<'_>>>(flash, addr)
}
