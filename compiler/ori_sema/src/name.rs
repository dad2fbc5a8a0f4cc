//! Declaration and package names.

use std::fmt;
use std::sync::Arc;

/// Name of a declaration.
///
/// Special names (`<ERROR CLASS>`, `<init>`) cannot be written in source.
/// They keep their angle brackets so they render unambiguously.
///
/// Cloning is a reference-count bump.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Name {
    text: Arc<str>,
    special: bool,
}

impl Name {
    /// A name that could appear in source code.
    pub fn identifier(text: &str) -> Self {
        Name {
            text: Arc::from(text),
            special: false,
        }
    }

    /// A compiler-internal name, rendered as `<...>`.
    ///
    /// Text that is already bracketed is kept as is; anything else is
    /// wrapped, so `special("x")` and `special("<x>")` are the same name.
    pub fn special(text: &str) -> Self {
        let text: Arc<str> = if text.starts_with('<') && text.ends_with('>') && text.len() > 1 {
            Arc::from(text)
        } else {
            Arc::from(format!("<{text}>"))
        };
        Name {
            text,
            special: true,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.special
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.text)
    }
}

/// Fully qualified package name (`ori.collections`).
///
/// The root package has no segments.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct FqName {
    segments: Arc<[Name]>,
}

impl FqName {
    pub fn root() -> Self {
        FqName {
            segments: Arc::from(Vec::new()),
        }
    }

    /// Parse a dotted path. The empty string is the root package.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        let segments: Vec<Name> = dotted.split('.').map(Name::identifier).collect();
        FqName {
            segments: Arc::from(segments),
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Name] {
        &self.segments
    }

    /// Last segment, or `None` for the root package.
    pub fn short_name(&self) -> Option<&Name> {
        self.segments.last()
    }

    /// Enclosing package, or `None` for the root package.
    pub fn parent(&self) -> Option<FqName> {
        let (_, parent) = self.segments.split_last()?;
        Some(FqName {
            segments: Arc::from(parent),
        })
    }

    pub fn child(&self, name: &Name) -> FqName {
        let mut segments = self.segments.to_vec();
        segments.push(name.clone());
        FqName {
            segments: Arc::from(segments),
        }
    }
}

impl fmt::Display for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FqName({self})")
    }
}
