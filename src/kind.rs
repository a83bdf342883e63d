use std::sync::OnceLock;

use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result};

/// Every value kind that can be both read and written.
///
/// Names are matched case-insensitively, so `"UInt16BE"`, `"uint16be"` and `"UINT16BE"` all parse
/// to [`Kind::UInt16Be`]. Kinds without a `BE`/`LE` suffix use the byte order of the reader or
/// writer they are used with.
///
/// The `Int64*` and `UInt64*` kinds are aliases of `BigInt64*` and `BigUInt64*`; they dispatch to
/// the same functions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum Kind {
    #[strum(to_string = "AsString")]
    AsString,
    #[strum(to_string = "UTF8")]
    Utf8,
    #[strum(to_string = "Bytes")]
    Bytes,
    #[strum(to_string = "datetime")]
    DateTime,
    #[strum(to_string = "ieee754")]
    Ieee754,
    #[strum(to_string = "ieee754BE")]
    Ieee754Be,
    #[strum(to_string = "ieee754LE")]
    Ieee754Le,
    #[strum(to_string = "Int8")]
    Int8,
    #[strum(to_string = "UInt8")]
    UInt8,
    #[strum(to_string = "Int16")]
    Int16,
    #[strum(to_string = "Int16BE")]
    Int16Be,
    #[strum(to_string = "Int16LE")]
    Int16Le,
    #[strum(to_string = "UInt16")]
    UInt16,
    #[strum(to_string = "UInt16BE")]
    UInt16Be,
    #[strum(to_string = "UInt16LE")]
    UInt16Le,
    #[strum(to_string = "Int32")]
    Int32,
    #[strum(to_string = "Int32BE")]
    Int32Be,
    #[strum(to_string = "Int32LE")]
    Int32Le,
    #[strum(to_string = "UInt32")]
    UInt32,
    #[strum(to_string = "UInt32BE")]
    UInt32Be,
    #[strum(to_string = "UInt32LE")]
    UInt32Le,
    #[strum(to_string = "Int")]
    Int,
    #[strum(to_string = "IntBE")]
    IntBe,
    #[strum(to_string = "IntLE")]
    IntLe,
    #[strum(to_string = "UInt")]
    UInt,
    #[strum(to_string = "UIntBE")]
    UIntBe,
    #[strum(to_string = "UIntLE")]
    UIntLe,
    #[strum(to_string = "BigInt64")]
    BigInt64,
    #[strum(to_string = "BigInt64BE")]
    BigInt64Be,
    #[strum(to_string = "BigInt64LE")]
    BigInt64Le,
    #[strum(to_string = "BigUInt64")]
    BigUInt64,
    #[strum(to_string = "BigUInt64BE")]
    BigUInt64Be,
    #[strum(to_string = "BigUInt64LE")]
    BigUInt64Le,
    #[strum(to_string = "Int64")]
    Int64,
    #[strum(to_string = "Int64BE")]
    Int64Be,
    #[strum(to_string = "Int64LE")]
    Int64Le,
    #[strum(to_string = "UInt64")]
    UInt64,
    #[strum(to_string = "UInt64BE")]
    UInt64Be,
    #[strum(to_string = "UInt64LE")]
    UInt64Le,
    #[strum(to_string = "Float")]
    Float,
    #[strum(to_string = "FloatBE")]
    FloatBe,
    #[strum(to_string = "FloatLE")]
    FloatLe,
    #[strum(to_string = "Double")]
    Double,
    #[strum(to_string = "DoubleBE")]
    DoubleBe,
    #[strum(to_string = "DoubleLE")]
    DoubleLe,
    #[strum(to_string = "Float24_32")]
    Float24_32,
    #[strum(to_string = "Float24_32BE")]
    Float24_32Be,
    #[strum(to_string = "Float24_32LE")]
    Float24_32Le,
    #[strum(to_string = "SFloat12_16")]
    SFloat12_16,
    #[strum(to_string = "SFloat12_16BE")]
    SFloat12_16Be,
    #[strum(to_string = "SFloat12_16LE")]
    SFloat12_16Le,
}

impl Kind {
    /// Looks up a kind by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse().map_err(|_| {
            log::debug!("no value kind is named '{name}'");
            Error::UnknownKind(name.to_owned())
        })
    }

    /// The canonical spelling of the kind name.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The all-lowercase spelling of the kind name. It parses back to the same kind.
    pub fn lowercase_name(self) -> String {
        self.name().to_ascii_lowercase()
    }

    /// The number of bytes a value of this kind always occupies, or `None` for kinds whose size
    /// depends on the value or on per-call options.
    pub fn width(self) -> Option<usize> {
        use Kind::*;
        match self {
            Int8 | UInt8 => Some(1),
            Int16 | Int16Be | Int16Le | UInt16 | UInt16Be | UInt16Le => Some(2),
            SFloat12_16 | SFloat12_16Be | SFloat12_16Le => Some(2),
            Int32 | Int32Be | Int32Le | UInt32 | UInt32Be | UInt32Le => Some(4),
            Float | FloatBe | FloatLe | Float24_32 | Float24_32Be | Float24_32Le => Some(4),
            BigInt64 | BigInt64Be | BigInt64Le | BigUInt64 | BigUInt64Be | BigUInt64Le => Some(8),
            Int64 | Int64Be | Int64Le | UInt64 | UInt64Be | UInt64Le => Some(8),
            Double | DoubleBe | DoubleLe => Some(8),
            DateTime => Some(crate::DATE_TIME_SIZE),
            AsString | Utf8 | Bytes | Ieee754 | Ieee754Be | Ieee754Le => None,
            Int | IntBe | IntLe | UInt | UIntBe | UIntLe => None,
        }
    }
}

/// Every kind implemented by both [`BufferReader`](crate::BufferReader) and
/// [`BufferWriter`](crate::BufferWriter), sorted by name without regard to case.
///
/// The dispatch tables [`decoder`](crate::decoder) and [`encoder`](crate::encoder) match
/// exhaustively on [`Kind`], so every variant is implemented on both sides. The list is built on
/// first use and shared for the lifetime of the process.
pub fn types() -> &'static [Kind] {
    static TYPES: OnceLock<Vec<Kind>> = OnceLock::new();
    TYPES.get_or_init(|| {
        debug_assert_eq!(Kind::iter().count(), Kind::COUNT);
        let mut kinds: Vec<Kind> = Kind::iter().collect();
        kinds.sort_by_cached_key(|kind| kind.lowercase_name());
        kinds
    })
}
