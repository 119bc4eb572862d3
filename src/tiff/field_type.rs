//! Field types and the value codec
//!
//! Every directory entry declares a type code. The code alone selects how
//! the value bytes are interpreted: the same logical tag may be stored as
//! SHORT in one file and LONG8 in a BigTIFF, so decoding never looks at the
//! tag. Values are held in [`FieldValue`], a tagged union with one variant
//! per type code, and converted to and from bytes in a given byte order.

use std::fmt;
use std::io::Cursor;

use crate::io::byte_order::ByteOrder;
use crate::tiff::constants::field_types;
use crate::tiff::errors::{TiffError, TiffResult};

/// On-disk TIFF field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Byte,
    Ascii,
    Short,
    Long,
    Rational,
    SByte,
    Undefined,
    SShort,
    SLong,
    SRational,
    Float,
    Double,
    Ifd,
    Long8,
    SLong8,
    Ifd8,
}

impl FieldType {
    /// Resolves a type code read from a directory entry
    ///
    /// Unknown codes yield [`TiffError::UnsupportedFieldType`]; the element
    /// size of such a field is unknown, so callers drop it.
    pub fn from_code(code: u16) -> TiffResult<Self> {
        let field_type = match code {
            field_types::BYTE => FieldType::Byte,
            field_types::ASCII => FieldType::Ascii,
            field_types::SHORT => FieldType::Short,
            field_types::LONG => FieldType::Long,
            field_types::RATIONAL => FieldType::Rational,
            field_types::SBYTE => FieldType::SByte,
            field_types::UNDEFINED => FieldType::Undefined,
            field_types::SSHORT => FieldType::SShort,
            field_types::SLONG => FieldType::SLong,
            field_types::SRATIONAL => FieldType::SRational,
            field_types::FLOAT => FieldType::Float,
            field_types::DOUBLE => FieldType::Double,
            field_types::IFD => FieldType::Ifd,
            field_types::LONG8 => FieldType::Long8,
            field_types::SLONG8 => FieldType::SLong8,
            field_types::IFD8 => FieldType::Ifd8,
            other => return Err(TiffError::UnsupportedFieldType(other)),
        };
        Ok(field_type)
    }

    /// Type code written to a directory entry
    pub fn code(&self) -> u16 {
        match self {
            FieldType::Byte => field_types::BYTE,
            FieldType::Ascii => field_types::ASCII,
            FieldType::Short => field_types::SHORT,
            FieldType::Long => field_types::LONG,
            FieldType::Rational => field_types::RATIONAL,
            FieldType::SByte => field_types::SBYTE,
            FieldType::Undefined => field_types::UNDEFINED,
            FieldType::SShort => field_types::SSHORT,
            FieldType::SLong => field_types::SLONG,
            FieldType::SRational => field_types::SRATIONAL,
            FieldType::Float => field_types::FLOAT,
            FieldType::Double => field_types::DOUBLE,
            FieldType::Ifd => field_types::IFD,
            FieldType::Long8 => field_types::LONG8,
            FieldType::SLong8 => field_types::SLONG8,
            FieldType::Ifd8 => field_types::IFD8,
        }
    }

    /// Size in bytes of a single element
    pub fn size(&self) -> u64 {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SShort => 2,
            FieldType::Long | FieldType::SLong | FieldType::Float | FieldType::Ifd => 4,
            FieldType::Rational | FieldType::SRational | FieldType::Double => 8,
            FieldType::Long8 | FieldType::SLong8 | FieldType::Ifd8 => 8,
        }
    }

    /// Human-readable type name
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Byte => "BYTE",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "SHORT",
            FieldType::Long => "LONG",
            FieldType::Rational => "RATIONAL",
            FieldType::SByte => "SBYTE",
            FieldType::Undefined => "UNDEFINED",
            FieldType::SShort => "SSHORT",
            FieldType::SLong => "SLONG",
            FieldType::SRational => "SRATIONAL",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::Ifd => "IFD",
            FieldType::Long8 => "LONG8",
            FieldType::SLong8 => "SLONG8",
            FieldType::Ifd8 => "IFD8",
        }
    }

    /// Types that only exist in BigTIFF files
    pub fn is_big_tiff_only(&self) -> bool {
        matches!(self, FieldType::Long8 | FieldType::SLong8 | FieldType::Ifd8)
    }

    /// Decodes value bytes of this type
    ///
    /// The byte length must be a whole number of elements.
    pub fn decode(&self, bytes: &[u8], byte_order: ByteOrder) -> TiffResult<FieldValue> {
        let size = self.size() as usize;
        if bytes.len() % size != 0 {
            return Err(TiffError::Format(format!(
                "{} bytes is not a whole number of {} values",
                bytes.len(),
                self.name()
            )));
        }

        let count = bytes.len() / size;
        let handler = byte_order.create_handler();
        let mut cursor = Cursor::new(bytes);

        let value = match self {
            FieldType::Byte => FieldValue::Byte(bytes.to_vec()),
            FieldType::Undefined => FieldValue::Undefined(bytes.to_vec()),
            FieldType::SByte => FieldValue::SByte(bytes.iter().map(|b| *b as i8).collect()),
            FieldType::Ascii => FieldValue::Ascii(decode_ascii(bytes)),
            FieldType::Short => FieldValue::Short(read_n(count, || handler.read_u16(&mut cursor))?),
            FieldType::SShort => FieldValue::SShort(read_n(count, || handler.read_i16(&mut cursor))?),
            FieldType::Long => FieldValue::Long(read_n(count, || handler.read_u32(&mut cursor))?),
            FieldType::Ifd => FieldValue::Ifd(read_n(count, || handler.read_u32(&mut cursor))?),
            FieldType::SLong => FieldValue::SLong(read_n(count, || handler.read_i32(&mut cursor))?),
            FieldType::Float => FieldValue::Float(read_n(count, || handler.read_f32(&mut cursor))?),
            FieldType::Double => FieldValue::Double(read_n(count, || handler.read_f64(&mut cursor))?),
            FieldType::Long8 => FieldValue::Long8(read_n(count, || handler.read_u64(&mut cursor))?),
            FieldType::Ifd8 => FieldValue::Ifd8(read_n(count, || handler.read_u64(&mut cursor))?),
            FieldType::SLong8 => FieldValue::SLong8(read_n(count, || handler.read_i64(&mut cursor))?),
            FieldType::Rational => FieldValue::Rational(read_n(count, || {
                handler.read_rational(&mut cursor).map(|(n, d)| Rational::new(n, d))
            })?),
            FieldType::SRational => FieldValue::SRational(read_n(count, || {
                handler.read_srational(&mut cursor).map(|(n, d)| SRational::new(n, d))
            })?),
        };
        Ok(value)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

fn read_n<T>(count: usize, mut read: impl FnMut() -> std::io::Result<T>) -> TiffResult<Vec<T>> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(read()?);
    }
    Ok(values)
}

/// Splits NUL-separated ASCII into strings; a missing final NUL is tolerated
///
/// Each byte maps to the char with the same code point, so bytes above 0x7F
/// survive a decode/encode cycle unchanged.
fn decode_ascii(bytes: &[u8]) -> Vec<String> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(&[0]).unwrap_or(bytes);
    body.split(|b| *b == 0)
        .map(|s| s.iter().map(|&b| char::from(b)).collect())
        .collect()
}

/// Appends one ASCII component without its terminator
///
/// Chars up to U+00FF are written as a single byte; anything wider falls
/// back to its UTF-8 encoding.
fn encode_ascii(s: &str, out: &mut Vec<u8>) {
    for c in s.chars() {
        match u8::try_from(c) {
            Ok(b) => out.push(b),
            Err(_) => {
                let mut buffer = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
            }
        }
    }
}

fn ascii_length(s: &str) -> u64 {
    s.chars().map(|c| if u32::from(c) <= 0xFF { 1 } else { c.len_utf8() as u64 }).sum()
}

/// Unsigned numerator/denominator pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub fn new(numerator: u32, denominator: u32) -> Self {
        Rational { numerator, denominator }
    }

    /// Floating point value; a zero denominator yields infinity or NaN
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Closest fraction with 32-bit terms, by continued fraction expansion
    ///
    /// Negative and non-finite inputs yield 0/1; values past `u32::MAX`
    /// saturate.
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Rational::new(0, 1);
        }
        if value >= u32::MAX as f64 {
            return Rational::new(u32::MAX, 1);
        }

        let limit = u32::MAX as u64;
        let (mut h0, mut h1) = (0u64, 1u64);
        let (mut k0, mut k1) = (1u64, 0u64);
        let mut best = Rational::new(value.round() as u32, 1);
        let mut x = value;

        for _ in 0..32 {
            let a = x.floor();
            let term = a as u64;
            let h2 = term.saturating_mul(h1).saturating_add(h0);
            let k2 = term.saturating_mul(k1).saturating_add(k0);
            if h2 > limit || k2 > limit {
                break;
            }
            best = Rational::new(h2 as u32, k2 as u32);

            let fraction = x - a;
            if fraction < 1e-12 || (best.to_f64() - value).abs() < 1e-12 {
                break;
            }
            x = 1.0 / fraction;
            h0 = h1;
            h1 = h2;
            k0 = k1;
            k1 = k2;
        }
        best
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Signed numerator/denominator pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SRational {
    pub fn new(numerator: i32, denominator: i32) -> Self {
        SRational { numerator, denominator }
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl fmt::Display for SRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A decoded field value, one variant per field type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Byte(Vec<u8>),
    Ascii(Vec<String>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<Rational>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<SRational>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    Ifd(Vec<u32>),
    Long8(Vec<u64>),
    SLong8(Vec<i64>),
    Ifd8(Vec<u64>),
}

impl FieldValue {
    /// The field type this value encodes as
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Byte(_) => FieldType::Byte,
            FieldValue::Ascii(_) => FieldType::Ascii,
            FieldValue::Short(_) => FieldType::Short,
            FieldValue::Long(_) => FieldType::Long,
            FieldValue::Rational(_) => FieldType::Rational,
            FieldValue::SByte(_) => FieldType::SByte,
            FieldValue::Undefined(_) => FieldType::Undefined,
            FieldValue::SShort(_) => FieldType::SShort,
            FieldValue::SLong(_) => FieldType::SLong,
            FieldValue::SRational(_) => FieldType::SRational,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Double(_) => FieldType::Double,
            FieldValue::Ifd(_) => FieldType::Ifd,
            FieldValue::Long8(_) => FieldType::Long8,
            FieldValue::SLong8(_) => FieldType::SLong8,
            FieldValue::Ifd8(_) => FieldType::Ifd8,
        }
    }

    /// Entry count: number of elements, or encoded byte length for ASCII
    pub fn count(&self) -> u64 {
        match self {
            FieldValue::Byte(v) | FieldValue::Undefined(v) => v.len() as u64,
            FieldValue::Ascii(v) => v.iter().map(|s| ascii_length(s) + 1).sum(),
            FieldValue::Short(v) => v.len() as u64,
            FieldValue::Long(v) | FieldValue::Ifd(v) => v.len() as u64,
            FieldValue::Rational(v) => v.len() as u64,
            FieldValue::SByte(v) => v.len() as u64,
            FieldValue::SShort(v) => v.len() as u64,
            FieldValue::SLong(v) => v.len() as u64,
            FieldValue::SRational(v) => v.len() as u64,
            FieldValue::Float(v) => v.len() as u64,
            FieldValue::Double(v) => v.len() as u64,
            FieldValue::Long8(v) | FieldValue::Ifd8(v) => v.len() as u64,
            FieldValue::SLong8(v) => v.len() as u64,
        }
    }

    /// Encodes the value in the given byte order
    pub fn encode(&self, byte_order: ByteOrder) -> TiffResult<Vec<u8>> {
        let handler = byte_order.create_handler();
        let mut out: Vec<u8> = Vec::with_capacity((self.count() * self.field_type().size()) as usize);

        match self {
            FieldValue::Byte(v) | FieldValue::Undefined(v) => out.extend_from_slice(v),
            FieldValue::SByte(v) => out.extend(v.iter().map(|b| *b as u8)),
            FieldValue::Ascii(v) => {
                for s in v {
                    encode_ascii(s, &mut out);
                    out.push(0);
                }
            }
            FieldValue::Short(v) => for x in v { handler.write_u16(&mut out, *x)? },
            FieldValue::SShort(v) => for x in v { handler.write_i16(&mut out, *x)? },
            FieldValue::Long(v) | FieldValue::Ifd(v) => for x in v { handler.write_u32(&mut out, *x)? },
            FieldValue::SLong(v) => for x in v { handler.write_i32(&mut out, *x)? },
            FieldValue::Float(v) => for x in v { handler.write_f32(&mut out, *x)? },
            FieldValue::Double(v) => for x in v { handler.write_f64(&mut out, *x)? },
            FieldValue::Long8(v) | FieldValue::Ifd8(v) => for x in v { handler.write_u64(&mut out, *x)? },
            FieldValue::SLong8(v) => for x in v { handler.write_i64(&mut out, *x)? },
            FieldValue::Rational(v) => {
                for r in v {
                    handler.write_u32(&mut out, r.numerator)?;
                    handler.write_u32(&mut out, r.denominator)?;
                }
            }
            FieldValue::SRational(v) => {
                for r in v {
                    handler.write_i32(&mut out, r.numerator)?;
                    handler.write_i32(&mut out, r.denominator)?;
                }
            }
        }
        Ok(out)
    }

    /// Every element widened to u64, for the unsigned integer types
    pub fn as_u64s(&self) -> Option<Vec<u64>> {
        match self {
            FieldValue::Byte(v) | FieldValue::Undefined(v) => Some(v.iter().map(|x| *x as u64).collect()),
            FieldValue::Short(v) => Some(v.iter().map(|x| *x as u64).collect()),
            FieldValue::Long(v) | FieldValue::Ifd(v) => Some(v.iter().map(|x| *x as u64).collect()),
            FieldValue::Long8(v) | FieldValue::Ifd8(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
            const MAX_SHOWN: usize = 16;
            if values.len() == 1 {
                return write!(f, "{}", values[0]);
            }
            write!(f, "[")?;
            for (i, v) in values.iter().take(MAX_SHOWN).enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            if values.len() > MAX_SHOWN {
                write!(f, ", ... ({} values)", values.len())?;
            }
            write!(f, "]")
        }

        match self {
            FieldValue::Ascii(v) => {
                let quoted: Vec<String> = v.iter().map(|s| format!("\"{}\"", s)).collect();
                list(f, &quoted)
            }
            FieldValue::Byte(v) | FieldValue::Undefined(v) => list(f, v),
            FieldValue::SByte(v) => list(f, v),
            FieldValue::Short(v) => list(f, v),
            FieldValue::SShort(v) => list(f, v),
            FieldValue::Long(v) | FieldValue::Ifd(v) => list(f, v),
            FieldValue::SLong(v) => list(f, v),
            FieldValue::Rational(v) => list(f, v),
            FieldValue::SRational(v) => list(f, v),
            FieldValue::Float(v) => list(f, v),
            FieldValue::Double(v) => list(f, v),
            FieldValue::Long8(v) | FieldValue::Ifd8(v) => list(f, v),
            FieldValue::SLong8(v) => list(f, v),
        }
    }
}

macro_rules! field_value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self {
                    FieldValue::$variant(vec![value])
                }
            }

            impl From<Vec<$t>> for FieldValue {
                fn from(values: Vec<$t>) -> Self {
                    FieldValue::$variant(values)
                }
            }

            impl From<&[$t]> for FieldValue {
                fn from(values: &[$t]) -> Self {
                    FieldValue::$variant(values.to_vec())
                }
            }
        )*
    };
}

field_value_from! {
    u8 => Byte,
    i8 => SByte,
    u16 => Short,
    i16 => SShort,
    u32 => Long,
    i32 => SLong,
    u64 => Long8,
    i64 => SLong8,
    f32 => Float,
    f64 => Double,
    Rational => Rational,
    SRational => SRational,
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Ascii(vec![value.to_string()])
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Ascii(vec![value])
    }
}

/// Extraction of typed elements from a [`FieldValue`]
///
/// Unsigned integers widen: a `u32` can be read from SHORT or LONG, a `u64`
/// from any unsigned integer type. Returns `None` when the variant does not
/// hold values convertible to `Self`.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>>;
}

impl FromFieldValue for u8 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::Byte(v) | FieldValue::Undefined(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for i8 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::SByte(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for u16 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::Short(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for i16 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::SShort(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for u32 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::Short(v) => Some(v.into_iter().map(u32::from).collect()),
            FieldValue::Long(v) | FieldValue::Ifd(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for i32 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::SShort(v) => Some(v.into_iter().map(i32::from).collect()),
            FieldValue::SLong(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for u64 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::Short(v) => Some(v.into_iter().map(u64::from).collect()),
            FieldValue::Long(v) | FieldValue::Ifd(v) => Some(v.into_iter().map(u64::from).collect()),
            FieldValue::Long8(v) | FieldValue::Ifd8(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::SShort(v) => Some(v.into_iter().map(i64::from).collect()),
            FieldValue::SLong(v) => Some(v.into_iter().map(i64::from).collect()),
            FieldValue::SLong8(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for f32 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::Float(v) => Some(v.into_iter().map(f64::from).collect()),
            FieldValue::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for Rational {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::Rational(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for SRational {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::SRational(v) => Some(v),
            _ => None,
        }
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> Option<Vec<Self>> {
        match value {
            FieldValue::Ascii(v) => Some(v),
            _ => None,
        }
    }
}
