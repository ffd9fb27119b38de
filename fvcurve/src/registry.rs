use crate::config::{default_curve_name, EditorConfig};
use crate::error::{EditError, EditResult};
use crate::group::CurveGroup;
use crate::json::{self, SessionRecord};
use crate::model::GroupData;
use log::info;

/// Asks the operator before a group is thrown away.
pub trait Confirm {
    fn confirm_remove(&mut self, group: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm_remove(&mut self, group: &str) -> bool { self(group) }
}

/// Named groups in tab order. Never empty; exactly one is active.
pub struct Registry {
    groups: Vec<CurveGroup>,
    active: usize,
    config: EditorConfig,
}

impl Registry {
    /// One empty "Group 1" with the configured default curves.
    pub fn new(config: EditorConfig) -> EditResult<Self> { Self::with_groups(config, Vec::new()) }

    /// Groups are added in order and each becomes active as it lands, so the
    /// last one is selected afterwards.
    pub fn with_groups(config: EditorConfig, initial: Vec<(String, GroupData)>) -> EditResult<Self> {
        let mut reg = Registry { groups: Vec::new(), active: 0, config: config.sanitized() };
        if initial.is_empty() {
            let data = reg.default_data()?;
            reg.create_group("Group 1", data)?;
        }
        for (name, data) in initial {
            reg.create_group(name, data)?;
        }
        Ok(reg)
    }

    /// Rebuild from a session dump. Curves are named "Curve A", "Curve B", ...
    pub fn from_session_text(config: EditorConfig, text: &str) -> EditResult<Self> {
        let config = config.sanitized();
        let mut initial = Vec::new();
        for (name, lists) in json::parse_session(text, config.max_points_per_curve)? {
            let curves = lists.into_iter().enumerate().map(|(i, pts)| (default_curve_name(i), pts)).collect();
            initial.push((name, GroupData::new(curves)?));
        }
        Self::with_groups(config, initial)
    }

    pub fn config(&self) -> &EditorConfig { &self.config }
    pub fn len(&self) -> usize { self.groups.len() }
    pub fn is_empty(&self) -> bool { self.groups.is_empty() }
    pub fn names(&self) -> Vec<&str> { self.groups.iter().map(|g| g.name()).collect() }
    pub fn contains(&self, name: &str) -> bool { self.position(name).is_some() }
    fn position(&self, name: &str) -> Option<usize> { self.groups.iter().position(|g| g.name() == name) }

    pub fn default_data(&self) -> EditResult<GroupData> {
        GroupData::with_empty_curves(self.config.default_curves.iter().cloned())
    }

    /// "Group n" for the smallest positive n not in use.
    pub fn generate_unique_name(&self) -> String {
        let mut i = 1;
        while self.contains(&format!("Group {}", i)) {
            i += 1;
        }
        format!("Group {}", i)
    }

    /// Register a group and make it active.
    pub fn create_group(&mut self, name: impl Into<String>, data: GroupData) -> EditResult<&mut CurveGroup> {
        let name = name.into();
        if self.contains(&name) {
            return Err(EditError::DuplicateName(name));
        }
        info!("group '{}' created with {} curves", name, data.len());
        self.groups.push(CurveGroup::new(name, data, &self.config));
        self.active = self.groups.len() - 1;
        Ok(&mut self.groups[self.active])
    }

    pub fn add_default_group(&mut self) -> EditResult<&mut CurveGroup> {
        let name = self.generate_unique_name();
        let data = self.default_data()?;
        self.create_group(name, data)
    }

    /// Remove after confirmation. Returns false when the operator declined.
    pub fn remove_group(&mut self, name: &str, confirm: &mut dyn Confirm) -> EditResult<bool> {
        let idx = self.position(name).ok_or_else(|| EditError::UnknownGroup(name.to_string()))?;
        if self.groups.len() <= 1 {
            return Err(EditError::LastGroup);
        }
        if !confirm.confirm_remove(name) {
            return Ok(false);
        }
        self.groups.remove(idx);
        if self.active > idx || self.active >= self.groups.len() {
            self.active -= 1;
        }
        info!("group '{}' removed", name);
        Ok(true)
    }

    pub fn select(&mut self, name: &str) -> EditResult<()> {
        self.active = self.position(name).ok_or_else(|| EditError::UnknownGroup(name.to_string()))?;
        Ok(())
    }

    pub fn active(&self) -> &CurveGroup { &self.groups[self.active] }
    pub fn active_mut(&mut self) -> &mut CurveGroup { &mut self.groups[self.active] }
    pub fn active_name(&self) -> &str { self.groups[self.active].name() }
    pub fn group(&self, name: &str) -> Option<&CurveGroup> { self.groups.iter().find(|g| g.name() == name) }
    pub fn group_mut(&mut self, name: &str) -> Option<&mut CurveGroup> { self.groups.iter_mut().find(|g| g.name() == name) }
    pub fn groups(&self) -> &[CurveGroup] { &self.groups }

    /// `{group_name, data}` per group in tab order.
    pub fn export_session(&self) -> Vec<SessionRecord> {
        self.groups.iter()
            .map(|g| SessionRecord { group_name: g.name().to_string(), data: json::to_records(g.data()) })
            .collect()
    }

    pub fn export_session_text(&self) -> String { json::export_session_text(&self.export_session()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yes(_: &str) -> bool { true }

    #[test]
    fn starts_with_one_default_group() {
        let reg = Registry::new(EditorConfig::default()).unwrap();
        assert_eq!(reg.names(), vec!["Group 1"]);
        assert_eq!(reg.active().data().curve_names(), vec!["Curve A", "Curve B"]);
    }

    #[test]
    fn last_initial_group_is_active() {
        let d = |n: &str| GroupData::with_empty_curves([n]).unwrap();
        let reg = Registry::with_groups(EditorConfig::default(), vec![("A".into(), d("x")), ("B".into(), d("y"))]).unwrap();
        assert_eq!(reg.active_name(), "B");
        assert_eq!(reg.active().data().curve_names(), vec!["y"]);
    }

    #[test]
    fn unique_name_fills_gaps() {
        let mut reg = Registry::new(EditorConfig::default()).unwrap();
        let d = reg.default_data().unwrap();
        reg.create_group("Group 3", d).unwrap();
        assert_eq!(reg.generate_unique_name(), "Group 2");
        reg.add_default_group().unwrap();
        assert_eq!(reg.generate_unique_name(), "Group 4");
    }

    #[test]
    fn removing_active_selects_neighbour() {
        let mut reg = Registry::new(EditorConfig::default()).unwrap();
        reg.add_default_group().unwrap();
        reg.add_default_group().unwrap();
        assert_eq!(reg.active_name(), "Group 3");
        assert!(reg.remove_group("Group 3", &mut yes).unwrap());
        assert_eq!(reg.active_name(), "Group 2");
        reg.select("Group 1").unwrap();
        assert!(reg.remove_group("Group 1", &mut yes).unwrap());
        assert_eq!(reg.active_name(), "Group 2");
    }

    #[test]
    fn removing_before_active_keeps_selection() {
        let mut reg = Registry::new(EditorConfig::default()).unwrap();
        reg.add_default_group().unwrap();
        assert!(reg.remove_group("Group 1", &mut yes).unwrap());
        assert_eq!(reg.active_name(), "Group 2");
    }
}
