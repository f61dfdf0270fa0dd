/// Character encoding of `char`, `string` and `fixed_string` types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Encoding {
    Ascii,
    Utf8,
    Utf16,
    Utf32,
    Ucs2,
}

impl Encoding {
    /// The encoding assumed when `fixed_string` omits the argument.
    pub const DEFAULT: Encoding = Encoding::Utf8;

    /// Canonical spelling used by both serializers (unquoted).
    pub fn as_str(self) -> &'static str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::Utf8 => "utf8",
            Encoding::Utf16 => "utf16",
            Encoding::Utf32 => "utf32",
            Encoding::Ucs2 => "ucs2",
        }
    }

    /// Bytes per code unit.
    pub fn size(self) -> u64 {
        match self {
            Encoding::Ascii | Encoding::Utf8 => 1,
            Encoding::Utf16 | Encoding::Ucs2 => 2,
            Encoding::Utf32 => 4,
        }
    }

    /// Required alignment of one code unit.
    pub fn align(self) -> u16 {
        self.size() as u16
    }

    /// Inverse of [`as_str`](Self::as_str), for the external grammar.
    pub fn from_name(name: &str) -> Option<Encoding> {
        match name {
            "ascii" | "A" => Some(Encoding::Ascii),
            "utf8" | "U8" => Some(Encoding::Utf8),
            "utf16" | "U16" => Some(Encoding::Utf16),
            "utf32" | "U32" => Some(Encoding::Utf32),
            "ucs2" => Some(Encoding::Ucs2),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip() {
        for enc in [
            Encoding::Ascii,
            Encoding::Utf8,
            Encoding::Utf16,
            Encoding::Utf32,
            Encoding::Ucs2,
        ] {
            assert_eq!(Encoding::from_name(enc.as_str()), Some(enc));
        }
        assert_eq!(Encoding::from_name("latin1"), None);
    }

    #[test]
    fn code_unit_sizes() {
        assert_eq!(Encoding::Utf8.size(), 1);
        assert_eq!(Encoding::Ucs2.size(), 2);
        assert_eq!(Encoding::Utf32.size(), 4);
        assert_eq!(Encoding::Utf32.align(), 4);
    }
}
