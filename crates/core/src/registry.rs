//! Access to the font registration sets under HKLM and HKCU.

use std::{cell::RefCell, collections::BTreeMap, io};

use crate::{
    error::{Error, Result},
    scope::Scope,
};

/// One entry of a registration set: display name mapped to a file reference.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Registration {
    pub name: String,
    pub value: String,
}

/// Read and delete access to the per-scope font registration sets.
///
/// Every method fails with an error when the set itself cannot be opened.
/// `lookup` returns `Ok(None)` only when the set is readable and the name is
/// absent.
pub trait FontRegistry {
    fn lookup(&self, scope: Scope, name: &str) -> io::Result<Option<String>>;

    fn remove(&self, scope: Scope, name: &str) -> io::Result<()>;

    fn entries(&self, scope: Scope) -> io::Result<Vec<Registration>>;
}

/// All registrations of a scope, sorted by name.
pub fn registrations(registry: &dyn FontRegistry, scope: Scope) -> Result<Vec<Registration>> {
    let mut entries = registry
        .entries(scope)
        .map_err(|source| Error::RegistryUnavailable { scope, source })?;
    entries.sort();
    Ok(entries)
}

/// Registration sets held in memory.
#[derive(Debug, Default)]
pub struct MemoryRegistry {
    sets: RefCell<BTreeMap<Scope, BTreeMap<String, String>>>,
    unavailable: Vec<Scope>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, scope: Scope, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.sets.borrow_mut().entry(scope).or_default().insert(name.into(), value.into());
        self
    }

    /// Make every access to `scope` fail as if the key could not be opened.
    pub fn unavailable(mut self, scope: Scope) -> Self {
        self.unavailable.push(scope);
        self
    }

    pub fn contains(&self, scope: Scope, name: &str) -> bool {
        self.sets.borrow().get(&scope).is_some_and(|set| set.contains_key(name))
    }

    pub fn len(&self, scope: Scope) -> usize {
        self.sets.borrow().get(&scope).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self, scope: Scope) -> bool {
        self.len(scope) == 0
    }

    fn check(&self, scope: Scope) -> io::Result<()> {
        if self.unavailable.contains(&scope) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} font key is unavailable", scope.hive()),
            ));
        }
        Ok(())
    }
}

impl FontRegistry for MemoryRegistry {
    fn lookup(&self, scope: Scope, name: &str) -> io::Result<Option<String>> {
        self.check(scope)?;
        Ok(self.sets.borrow().get(&scope).and_then(|set| set.get(name).cloned()))
    }

    fn remove(&self, scope: Scope, name: &str) -> io::Result<()> {
        self.check(scope)?;
        let removed = self.sets.borrow_mut().get_mut(&scope).and_then(|set| set.remove(name));
        match removed {
            Some(_) => Ok(()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, format!("no value named {name}"))),
        }
    }

    fn entries(&self, scope: Scope) -> io::Result<Vec<Registration>> {
        self.check(scope)?;
        Ok(self
            .sets
            .borrow()
            .get(&scope)
            .into_iter()
            .flatten()
            .map(|(name, value)| Registration { name: name.clone(), value: value.clone() })
            .collect())
    }
}

/// The Windows registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRegistry;

#[cfg(windows)]
impl SystemRegistry {
    fn open(scope: Scope, flags: u32) -> io::Result<winreg::RegKey> {
        use winreg::{
            RegKey,
            enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE},
        };

        use crate::config::FONTS_KEY;

        let hive = match scope {
            Scope::Machine => HKEY_LOCAL_MACHINE,
            Scope::User => HKEY_CURRENT_USER,
        };
        RegKey::predef(hive).open_subkey_with_flags(FONTS_KEY, flags)
    }
}

#[cfg(windows)]
impl FontRegistry for SystemRegistry {
    fn lookup(&self, scope: Scope, name: &str) -> io::Result<Option<String>> {
        use winreg::enums::KEY_READ;

        let key = Self::open(scope, KEY_READ)?;
        match key.get_value::<String, _>(name) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn remove(&self, scope: Scope, name: &str) -> io::Result<()> {
        use winreg::enums::{KEY_READ, KEY_SET_VALUE};

        Self::open(scope, KEY_READ | KEY_SET_VALUE)?.delete_value(name)
    }

    fn entries(&self, scope: Scope) -> io::Result<Vec<Registration>> {
        use winreg::{enums::KEY_READ, types::FromRegValue};

        let key = Self::open(scope, KEY_READ)?;
        key.enum_values()
            .map(|entry| {
                let (name, raw) = entry?;
                // Non-string values are kept with empty data so the name still lists.
                let value = String::from_reg_value(&raw).unwrap_or_default();
                Ok(Registration { name, value })
            })
            .collect()
    }
}

#[cfg(not(windows))]
impl FontRegistry for SystemRegistry {
    fn lookup(&self, _scope: Scope, _name: &str) -> io::Result<Option<String>> {
        Err(crate::host::unsupported())
    }

    fn remove(&self, _scope: Scope, _name: &str) -> io::Result<()> {
        Err(crate::host::unsupported())
    }

    fn entries(&self, _scope: Scope) -> io::Result<Vec<Registration>> {
        Err(crate::host::unsupported())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_lookup_is_per_scope() {
        let registry = MemoryRegistry::new().with(Scope::Machine, "Arial (TrueType)", "arial.ttf");

        assert_eq!(
            registry.lookup(Scope::Machine, "Arial (TrueType)").unwrap().as_deref(),
            Some("arial.ttf")
        );
        assert_eq!(registry.lookup(Scope::User, "Arial (TrueType)").unwrap(), None);
    }

    #[test]
    fn test_memory_unavailable_scope() {
        let registry = MemoryRegistry::new().unavailable(Scope::User);

        assert!(registry.lookup(Scope::User, "x").is_err());
        assert!(registry.entries(Scope::Machine).unwrap().is_empty());
    }

    #[test]
    fn test_registrations_sorted() {
        let registry = MemoryRegistry::new()
            .with(Scope::User, "Zed", r"C:\Users\a\z.ttf")
            .with(Scope::User, "Alpha", r"C:\Users\a\a.ttf");

        let names: Vec<_> = registrations(&registry, Scope::User)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["Alpha", "Zed"]);
    }

    #[test]
    fn test_registrations_unavailable() {
        let registry = MemoryRegistry::new().unavailable(Scope::Machine);

        let err = registrations(&registry, Scope::Machine).unwrap_err();
        assert!(matches!(err, Error::RegistryUnavailable { scope: Scope::Machine, .. }));
    }
}
