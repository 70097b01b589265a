//! The variable/level bijection.

use rustc_hash::FxHashMap;

use crate::var::{Level, VarId};

/// Bijection between externally visible [`VarId`]s and internal
/// [`Level`]s. New variables are always appended at the deepest level
/// (closest to the leaves), matching `new_var`'s contract in
/// `original_source/BddMgr.h`: "新しい変数は最後の変数の後ろに挿入される"
/// ("the new variable is inserted after the last one").
#[derive(Debug, Default)]
pub struct VarMap {
    var_to_level: FxHashMap<VarId, Level>,
    level_to_var: Vec<VarId>,
    dvo_enabled: bool,
}

impl VarMap {
    pub fn new() -> Self {
        VarMap::default()
    }

    /// Number of registered variables, i.e. the number of levels.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.level_to_var.len()
    }

    /// Register `var` at the next (deepest) level.
    ///
    /// Returns `false` if `var` is already registered.
    pub fn new_var(&mut self, var: VarId) -> bool {
        if self.var_to_level.contains_key(&var) {
            return false;
        }
        let level = self.level_to_var.len() as Level;
        self.level_to_var.push(var);
        self.var_to_level.insert(var, level);
        true
    }

    /// The level of a registered variable.
    ///
    /// # Panics
    /// Querying an unregistered variable is a fatal contract violation.
    pub fn level(&self, var: VarId) -> Level {
        *self
            .var_to_level
            .get(&var)
            .unwrap_or_else(|| panic!("unregistered variable {var:?} queried for level"))
    }

    /// As [`VarMap::level`], but returns `None` instead of panicking;
    /// used by code paths that need to tolerate an unknown variable
    /// (e.g. cross-manager edge checks).
    pub fn try_level(&self, var: VarId) -> Option<Level> {
        self.var_to_level.get(&var).copied()
    }

    /// The variable registered at `level`.
    ///
    /// # Panics
    /// `level` must be a previously assigned level.
    pub fn varid(&self, level: Level) -> VarId {
        *self
            .level_to_var
            .get(level as usize)
            .unwrap_or_else(|| panic!("level {level} has no assigned variable"))
    }

    /// Variables in ascending level order.
    pub fn var_list(&self) -> &[VarId] {
        &self.level_to_var
    }

    pub fn enable_dvo(&mut self) {
        self.dvo_enabled = true;
    }

    pub fn disable_dvo(&mut self) {
        self.dvo_enabled = false;
    }

    pub fn dvo_enabled(&self) -> bool {
        self.dvo_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_var_appends_at_deepest_level() {
        let mut vm = VarMap::new();
        assert!(vm.new_var(VarId(10)));
        assert!(vm.new_var(VarId(20)));
        assert_eq!(vm.level(VarId(10)), 0);
        assert_eq!(vm.level(VarId(20)), 1);
        assert_eq!(vm.varid(0), VarId(10));
        assert_eq!(vm.varid(1), VarId(20));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut vm = VarMap::new();
        assert!(vm.new_var(VarId(1)));
        assert!(!vm.new_var(VarId(1)));
    }

    #[test]
    #[should_panic(expected = "unregistered variable")]
    fn unregistered_level_query_panics() {
        let vm = VarMap::new();
        vm.level(VarId(0));
    }
}
