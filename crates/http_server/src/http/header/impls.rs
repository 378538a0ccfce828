use std::num::ParseIntError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderParseError {
    #[error(transparent)]
    InvalidInt(#[from] ParseIntError),
}

/// A header with a fixed name and a typed value
pub trait HeaderField {
    const NAME: &'static str;
    type Output: HeaderValueTrait;

    fn parse(value: &str) -> Result<Self::Output, HeaderParseError> {
        Self::Output::from_header_value(value)
    }
}

pub trait HeaderValueTrait: Sized {
    fn from_header_value(value: &str) -> Result<Self, HeaderParseError>;
    fn to_header_value(&self) -> String;
}

macro_rules! header_struct {
    ($name: ident, $matcher: expr, $ty: ty) => {
        pub struct $name;

        impl HeaderField for $name {
            const NAME: &'static str = $matcher;
            type Output = $ty;
        }
    };
}

impl HeaderValueTrait for u64 {
    fn from_header_value(value: &str) -> Result<Self, HeaderParseError> {
        Ok(value.parse()?)
    }

    fn to_header_value(&self) -> String {
        self.to_string()
    }
}

impl HeaderValueTrait for String {
    fn from_header_value(value: &str) -> Result<Self, HeaderParseError> {
        Ok(value.to_string())
    }

    fn to_header_value(&self) -> String {
        self.clone()
    }
}

header_struct!(ContentLength, "Content-Length", u64);
header_struct!(ContentType, "Content-Type", String);
header_struct!(UserAgent, "User-Agent", String);
header_struct!(Allow, "Allow", String);
