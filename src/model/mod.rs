use std::collections::{HashMap, HashSet};
use tracing::debug;

/// One classified statistics row, as it comes out of the CSV parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Scope(String),
    Case { switch: String, value: String },
    Register { factory: String, id: String, class: String },
    Create { factory: String, id: String },
}

/// A named code region that was entered at least once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub name: String,
}

/// A multi-way branch point and the case values it was observed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    pub name: String,
    cases: Vec<String>,
}

impl Switch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    pub fn case(&mut self, value: &str) {
        if !self.cases.iter().any(|c| c == value) {
            self.cases.push(value.to_string());
        }
    }

    /// Case values in first-seen order.
    pub fn cases(&self) -> &[String] {
        &self.cases
    }
}

/// An object-creation site: what was registered under which id, and which
/// ids were actually instantiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    pub name: String,
    registered: HashMap<String, String>,
    created: Vec<String>,
}

impl Factory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registered: HashMap::new(),
            created: Vec::new(),
        }
    }

    /// Re-registering an id replaces the earlier class name.
    pub fn register(&mut self, id: &str, class: &str) {
        self.registered.insert(id.to_string(), class.to_string());
    }

    pub fn create(&mut self, id: &str) {
        if !self.created.iter().any(|c| c == id) {
            self.created.push(id.to_string());
        }
    }

    pub fn registered(&self, id: &str) -> Option<&str> {
        self.registered.get(id).map(String::as_str)
    }

    pub fn created(&self) -> &[String] {
        &self.created
    }

    /// Class names of created instances, skipping ids that were never registered.
    pub fn instances(&self) -> impl Iterator<Item = &str> + '_ {
        self.created.iter().filter_map(|id| {
            let class = self.registered(id);
            if class.is_none() {
                debug!("{}: created id {} was never registered", self.name, id);
            }
            class
        })
    }
}

/// Aggregated statistics across every input file.
///
/// All three collections iterate in first-insertion order so the generated
/// header is reproducible for a given input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stat {
    scopes: Vec<Scope>,
    scope_names: HashSet<String>,
    switches: Vec<Switch>,
    switch_index: HashMap<String, usize>,
    factories: Vec<Factory>,
    factory_index: HashMap<String, usize>,
}

impl Stat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate a sequence of records in order.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut stat = Self::new();
        for record in records {
            stat.apply(record);
        }
        stat
    }

    pub fn apply(&mut self, record: &Record) {
        match record {
            Record::Scope(name) => self.scope(name),
            Record::Case { switch, value } => self.switch(switch).case(value),
            Record::Register { factory, id, class } => self.factory(factory).register(id, class),
            Record::Create { factory, id } => self.factory(factory).create(id),
        }
    }

    pub fn scope(&mut self, name: &str) {
        if self.scope_names.insert(name.to_string()) {
            self.scopes.push(Scope {
                name: name.to_string(),
            });
        }
    }

    /// Switch by name, created on first use.
    pub fn switch(&mut self, name: &str) -> &mut Switch {
        let idx = match self.switch_index.get(name) {
            Some(&idx) => idx,
            None => {
                self.switches.push(Switch::new(name));
                self.switch_index
                    .insert(name.to_string(), self.switches.len() - 1);
                self.switches.len() - 1
            }
        };
        &mut self.switches[idx]
    }

    /// Factory by name, created on first use.
    pub fn factory(&mut self, name: &str) -> &mut Factory {
        let idx = match self.factory_index.get(name) {
            Some(&idx) => idx,
            None => {
                self.factories.push(Factory::new(name));
                self.factory_index
                    .insert(name.to_string(), self.factories.len() - 1);
                self.factories.len() - 1
            }
        };
        &mut self.factories[idx]
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    #[cfg(test)]
    pub fn get_switch(&self, name: &str) -> Option<&Switch> {
        self.switch_index.get(name).map(|&idx| &self.switches[idx])
    }

    #[cfg(test)]
    pub fn get_factory(&self, name: &str) -> Option<&Factory> {
        self.factory_index.get(name).map(|&idx| &self.factories[idx])
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty() && self.switches.is_empty() && self.factories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(switch: &str, value: &str) -> Record {
        Record::Case {
            switch: switch.to_string(),
            value: value.to_string(),
        }
    }

    fn reg(factory: &str, id: &str, class: &str) -> Record {
        Record::Register {
            factory: factory.to_string(),
            id: id.to_string(),
            class: class.to_string(),
        }
    }

    fn create(factory: &str, id: &str) -> Record {
        Record::Create {
            factory: factory.to_string(),
            id: id.to_string(),
        }
    }

    #[test]
    fn duplicate_scopes_collapse() {
        let records = vec![
            Record::Scope("a".into()),
            Record::Scope("b".into()),
            Record::Scope("a".into()),
        ];
        let stat = Stat::from_records(&records);
        let names: Vec<_> = stat.scopes().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn switch_cases_accumulate_without_duplicates() {
        let records = vec![case("bar", "on"), case("bar", "off"), case("bar", "on")];
        let stat = Stat::from_records(&records);
        assert_eq!(stat.switches().len(), 1);
        assert_eq!(stat.get_switch("bar").unwrap().cases(), ["on", "off"]);
    }

    #[test]
    fn last_registration_wins() {
        let records = vec![reg("f", "1", "Old"), reg("f", "1", "New"), create("f", "1")];
        let stat = Stat::from_records(&records);
        let f = stat.get_factory("f").unwrap();
        assert_eq!(f.instances().collect::<Vec<_>>(), ["New"]);
    }

    #[test]
    fn unregistered_creation_is_skipped() {
        let records = vec![reg("f", "1", "Impl1"), create("f", "2"), create("f", "1")];
        let stat = Stat::from_records(&records);
        let f = stat.get_factory("f").unwrap();
        assert_eq!(f.created(), ["2", "1"]);
        assert_eq!(f.instances().collect::<Vec<_>>(), ["Impl1"]);
    }

    #[test]
    fn create_before_register_resolves() {
        let records = vec![create("f", "7"), reg("f", "7", "Late")];
        let stat = Stat::from_records(&records);
        assert_eq!(
            stat.get_factory("f").unwrap().instances().collect::<Vec<_>>(),
            ["Late"]
        );
    }

    #[test]
    fn empty_stat() {
        assert!(Stat::new().is_empty());
        assert!(!Stat::from_records(&[create("f", "1")]).is_empty());
    }
}
