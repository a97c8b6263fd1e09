use std::fmt::{Display, Formatter};


/// Position of a pallet in the runtime, as reported by the metadata.
pub type ModuleIndex = u32;

/// Pallet index as it is encoded on chain.
pub type PalletIndex = u8;

/// Variant index of a call inside its pallet's call enum.
pub type CallIndex = u8;

pub type FunctionId = u64;

pub type ParameterId = u64;

/// Id of a type in the runtime's portable type registry.
pub type TypeHandle = u32;


/// The two bytes prefixing every encoded runtime call.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CallRef {
    pub pallet_index: PalletIndex,
    pub call_index: CallIndex
}


impl CallRef {
    /// Builds the prefix from a reported module index, if it fits into a byte.
    pub fn new(module_index: Option<ModuleIndex>, call_index: CallIndex) -> Option<Self> {
        let pallet_index = PalletIndex::try_from(module_index?).ok()?;
        Some(Self {
            pallet_index,
            call_index
        })
    }
}


impl Display for CallRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:02x}{:02x}", self.pallet_index, self.call_index)
    }
}


pub struct DisplayCallRefOption(pub Option<CallRef>);


impl Display for DisplayCallRefOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(r) = self.0 {
            write!(f, "{}", r)
        } else {
            write!(f, "None")
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{CallRef, DisplayCallRefOption};

    #[test]
    fn call_ref_is_rendered_as_hex_prefix() {
        let r = CallRef {
            pallet_index: 10,
            call_index: 3
        };
        assert_eq!(r.to_string(), "0x0a03");

        let r = CallRef {
            pallet_index: 255,
            call_index: 255
        };
        assert_eq!(r.to_string(), "0xffff");
    }

    #[test]
    fn call_ref_needs_a_byte_sized_module_index() {
        assert_eq!(CallRef::new(Some(6), 2), Some(CallRef { pallet_index: 6, call_index: 2 }));
        assert_eq!(CallRef::new(Some(0), 1), Some(CallRef { pallet_index: 0, call_index: 1 }));
        assert_eq!(CallRef::new(Some(256), 1), None);
        assert_eq!(CallRef::new(None, 1), None);
    }

    #[test]
    fn missing_call_ref_is_displayed_as_none() {
        assert_eq!(DisplayCallRefOption(None).to_string(), "None");
        assert_eq!(DisplayCallRefOption(CallRef::new(Some(4), 2)).to_string(), "0x0402");
    }
}
