//! Interned identifiers for nodes and clusters.
//!
//! Node keys are compared and hashed on every edge declaration, so they are
//! stored once in a process-wide [`string_interner`] and passed around as a
//! small [`Copy`] handle.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Interned identifier used as a node key or a cluster path.
///
/// # Examples
///
/// ```
/// use topograph_core::identifier::Id;
///
/// let alb = Id::new("alb");
/// assert_eq!(alb, "alb");
///
/// let vpc = Id::new("vpc");
/// assert_eq!(vpc.nested("public"), "vpc::public");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns the identifier `self::child`.
    ///
    /// Used to build the path of a cluster nested inside another one.
    pub fn nested(&self, child: &str) -> Self {
        let name = format!("{self}::{child}");
        Self::new(&name)
    }

    /// Returns the interned string.
    pub fn as_string(&self) -> String {
        with_interner(|interner| interner.resolve(self.0).unwrap_or_default().to_owned())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_same_name_same_id() {
        let a = Id::new("s3");
        let b = Id::new("s3");
        let c = Id::new("dynamodb");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "s3");
    }

    #[test]
    fn test_nested_paths() {
        let vpc = Id::new("VPC");
        let public = vpc.nested("Public Subnets");
        let deeper = public.nested("AZ a");

        assert_eq!(public, "VPC::Public Subnets");
        assert_eq!(deeper, "VPC::Public Subnets::AZ a");
        assert_ne!(public, vpc.nested("Private Subnets"));
    }

    #[test]
    fn test_display_and_from() {
        let id: Id = "tf_cli".into();
        assert_eq!(format!("{id}"), "tf_cli");
        assert_eq!(id, Id::from(&"tf_cli".to_string()));
    }

    #[test]
    fn test_usable_as_map_key() {
        let mut map = HashMap::new();
        map.insert(Id::new("ec2_1"), 1);
        map.insert(Id::new("ec2_2"), 2);

        assert_eq!(map.get(&Id::new("ec2_1")), Some(&1));
        assert_eq!(map.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_interning_round_trips(name in "\\PC*") {
            let id = Id::new(&name);
            prop_assert_eq!(id.as_string(), name.clone());
            prop_assert_eq!(id, Id::new(&name));
        }
    }
}
