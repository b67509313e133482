use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Set of acceptable proof-of-identity mechanisms for one authentication
    /// request, using the platform's bitmask values.
    ///
    /// The weak biometric class contains the strong class bits, so a request
    /// allowing `WEAK_BIOMETRIC` also admits strong-class sensors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Authenticators: u32 {
        /// Class 3 biometric (fingerprint, face, iris with secure hardware).
        const STRONG_BIOMETRIC = 0x000F;
        /// Class 2 biometric; superset of the strong class.
        const WEAK_BIOMETRIC = 0x00FF;
        /// The device PIN, pattern or password.
        const DEVICE_CREDENTIAL = 0x8000;
    }
}

impl Authenticators {
    /// True when a biometric of any class is part of the set.
    pub fn allows_biometric(&self) -> bool {
        self.intersects(Authenticators::WEAK_BIOMETRIC)
    }

    /// True when the device PIN/pattern/password is part of the set.
    pub fn allows_device_credential(&self) -> bool {
        self.contains(Authenticators::DEVICE_CREDENTIAL)
    }
}

impl fmt::Display for Authenticators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{}", name)?;
            first = false;
        }
        if first {
            write!(f, "NONE")?;
        }
        Ok(())
    }
}

// The wire format is the platform's raw bitmask, matching the integer the
// settings intent extra carries.
impl Serialize for Authenticators {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for Authenticators {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(Authenticators::from_bits_truncate(bits))
    }
}
