//! The demo fleet: one company store and a child store per car.
//!
//! The company store sets only the make. Each car inherits it and sets its
//! own model and year; the Golf can optionally override the make locally.

use protocfg_store::{ConfigStore, StoreResult};
use protocfg_types::{KeyId, KeyRegistry, TypeError};
use serde::Serialize;

pub mod car {
    protocfg_types::config_keys! {
        /// Model year.
        pub Year: i32 = 1;
        /// Manufacturer, usually inherited from the company store.
        pub Make: String = 2;
        /// Model name.
        pub Model: String = 3;
    }
}

use car::{Make, Model, Year};

/// Register every car key, failing on an id collision.
pub fn registry() -> Result<KeyRegistry, TypeError> {
    let mut registry = KeyRegistry::new();
    registry.register::<Year>()?;
    registry.register::<Make>()?;
    registry.register::<Model>()?;
    Ok(registry)
}

/// Root store shared by every car.
pub fn company(make: &str) -> ConfigStore<'static> {
    let mut company = ConfigStore::new();
    company.set::<Make>(make);
    company
}

/// One car: a label and its child store.
pub struct Car<'a> {
    pub label: &'static str,
    pub config: ConfigStore<'a>,
}

/// Build the cars on top of `company`.
pub fn cars<'a>(company: &'a ConfigStore<'a>, golf_make: Option<&str>) -> Vec<Car<'a>> {
    let mut jetta = ConfigStore::with_parent(company);
    jetta.set::<Model>("Jetta GLI");
    jetta.set::<Year>(2013);

    let mut golf = ConfigStore::with_parent(company);
    golf.set::<Model>("Golf");
    golf.set::<Year>(2010);
    if let Some(make) = golf_make {
        golf.set::<Make>(make);
    }

    vec![
        Car {
            label: "jetta",
            config: jetta,
        },
        Car {
            label: "golf",
            config: golf,
        },
    ]
}

/// Fully resolved car, as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarView {
    pub car: &'static str,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Whether the make was set on the car itself.
    pub make_overridden: bool,
}

impl Car<'_> {
    pub fn resolve(&self) -> StoreResult<CarView> {
        Ok(CarView {
            car: self.label,
            make: self.config.get::<Make>()?,
            model: self.config.get::<Model>()?,
            year: self.config.get::<Year>()?,
            make_overridden: self.config.has_own_key::<Make>(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyView {
    pub id: KeyId,
    pub name: Option<&'static str>,
}

/// Key summary of one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreKeys {
    pub store: &'static str,
    pub own_entries: usize,
    pub keys: Vec<KeyView>,
}

impl StoreKeys {
    pub fn of(label: &'static str, store: &ConfigStore<'_>, registry: &KeyRegistry) -> Self {
        let mut ids: Vec<KeyId> = store.keys().into_iter().collect();
        ids.sort();
        Self {
            store: label,
            own_entries: store.len(),
            keys: ids
                .into_iter()
                .map(|id| KeyView {
                    id,
                    name: registry.name_of(id),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cars_inherit_company_make() {
        let company = company("VW");
        let cars = cars(&company, None);

        let views: Vec<CarView> = cars.iter().map(|c| c.resolve().unwrap()).collect();
        assert_eq!(
            views,
            vec![
                CarView {
                    car: "jetta",
                    make: "VW".into(),
                    model: "Jetta GLI".into(),
                    year: 2013,
                    make_overridden: false,
                },
                CarView {
                    car: "golf",
                    make: "VW".into(),
                    model: "Golf".into(),
                    year: 2010,
                    make_overridden: false,
                },
            ]
        );
        assert!(!company.has_key::<Model>());
    }

    #[test]
    fn golf_make_override_stays_local() {
        let company = company("VW");
        let cars = cars(&company, Some("Audi"));

        let jetta = cars[0].resolve().unwrap();
        let golf = cars[1].resolve().unwrap();
        assert_eq!(jetta.make, "VW");
        assert_eq!(golf.make, "Audi");
        assert!(golf.make_overridden);
        assert_eq!(company.get::<Make>().unwrap(), "VW");
    }

    #[test]
    fn registry_names_every_key() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.name_of(KeyId::new(3)), Some("Model"));
    }

    #[test]
    fn store_keys_are_sorted_and_named() {
        let registry = registry().unwrap();
        let company = company("VW");
        let cars = cars(&company, None);

        let summary = StoreKeys::of("jetta", &cars[0].config, &registry);
        assert_eq!(summary.own_entries, 2);
        let names: Vec<_> = summary.keys.iter().map(|k| k.name).collect();
        assert_eq!(names, vec![Some("Year"), Some("Make"), Some("Model")]);

        let company_summary = StoreKeys::of("company", &company, &registry);
        assert_eq!(company_summary.own_entries, 1);
        assert_eq!(company_summary.keys.len(), 1);
    }

    #[test]
    fn car_view_serializes_to_json() {
        let company = company("VW");
        let cars = cars(&company, None);
        let json = serde_json::to_value(cars[1].resolve().unwrap()).unwrap();
        assert_eq!(json["make"], "VW");
        assert_eq!(json["year"], 2010);
    }
}
