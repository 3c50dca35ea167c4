use crate::errors::BadDispositionError;
use std::fmt::{Display, Formatter};

/// Whether the client should download the archive or display it in place.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Default)]
pub enum Disposition {
    #[default]
    Attachment,
    Inline,
}

impl Disposition {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attachment => "attachment",
            Self::Inline => "inline",
        }
    }

    #[inline]
    pub fn is_attachment(self) -> bool {
        self == Self::Attachment
    }

    #[inline]
    pub fn is_inline(self) -> bool {
        self == Self::Inline
    }
}

impl std::str::FromStr for Disposition {
    type Err = BadDispositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("attachment") {
            Ok(Self::Attachment)
        } else if s.eq_ignore_ascii_case("inline") {
            Ok(Self::Inline)
        } else {
            Err(BadDispositionError)
        }
    }
}

impl Display for Disposition {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}
