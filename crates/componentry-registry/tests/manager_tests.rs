// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the manager over real descriptor trees.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use componentry_core::{Capability, ComponentryError, ProfileState};
use componentry_registry::{Categories, Manager, ModuleExports, ModuleTable};
use componentry_test_utils::{
    ComponentTree, DescriptorSpec, MockComponent, RecordingLoader, failing_factory, mock_factory,
};

const DIAMOND: [&str; 4] = ["core.a", "core.b", "core.c", "core.d"];

fn diamond_manager() -> (ComponentTree, RecordingLoader, Manager) {
    let tree = ComponentTree::new().unwrap();
    tree.diamond().unwrap();
    let loader = RecordingLoader::with_mock_modules(["a", "b", "c", "d"]);
    let mut manager = Manager::new(loader.clone()).with_paths([tree.root()]);
    manager.register_all().unwrap();
    (tree, loader, manager)
}

#[test]
fn registered_fields_match_descriptor() {
    let tree = ComponentTree::new().unwrap();
    let path = tree
        .write(
            &DescriptorSpec::new("browser")
                .title("Database Browser")
                .object("DatabaseBrowser")
                .version("2.1")
                .requires(["core.db", "core.settings"])
                .author("Jane Doe")
                .email("jane@example.org")
                .url("http://example.org")
                .description("Browses the database."),
        )
        .unwrap();
    let bare = tree.write(&DescriptorSpec::new("bare")).unwrap();

    let mut manager = Manager::new(ModuleTable::new());
    assert_eq!(manager.register(&path).unwrap(), "core.browser");
    manager.register(&bare).unwrap();

    let profile = manager.profile("core.browser").unwrap();
    assert_eq!(profile.title(), "Database Browser");
    assert_eq!(profile.module(), "browser");
    assert_eq!(profile.attribute(), "DatabaseBrowser");
    assert_eq!(profile.version(), "2.1");
    assert_eq!(profile.require(), ["core.db", "core.settings"]);
    assert_eq!(profile.author(), Some("Jane Doe"));
    assert_eq!(profile.email(), Some("jane@example.org"));
    assert_eq!(profile.url(), Some("http://example.org"));
    assert_eq!(profile.description(), Some("Browses the database."));
    assert_eq!(profile.file(), path.as_path());
    assert_eq!(profile.directory(), tree.root().join("core/browser"));
    assert_eq!(profile.state(), ProfileState::Registered);

    let bare = manager.profile("core.bare").unwrap();
    assert!(bare.require().is_empty());
    assert_eq!(bare.title(), "core.bare");
}

#[test]
fn dependency_order_is_independent_of_registration_order() {
    let tree = ComponentTree::new().unwrap();
    let mut paths = tree.diamond().unwrap();

    for _ in 0..paths.len() {
        let mut manager = Manager::new(ModuleTable::new());
        for path in &paths {
            manager.register(path).unwrap();
        }
        assert_eq!(manager.list_ordered(true).unwrap(), DIAMOND);
        paths.rotate_left(1);
    }
}

#[test]
fn registry_order_lists_names_sorted() {
    let (_tree, _loader, manager) = diamond_manager();
    assert_eq!(manager.list_ordered(false).unwrap(), DIAMOND);
    assert_eq!(manager.names().collect::<Vec<_>>(), DIAMOND);
    assert_eq!(manager.len(), 4);
}

#[test]
fn dependents_are_transitive_in_dependency_order() {
    let (_tree, _loader, manager) = diamond_manager();
    assert_eq!(manager.list_dependents("core.a").unwrap(), ["core.b", "core.c", "core.d"]);
    assert_eq!(manager.list_dependents("core.b").unwrap(), ["core.c", "core.d"]);
    assert!(manager.list_dependents("core.d").unwrap().is_empty());
}

#[test]
fn cycles_fail_ordering_queries() {
    let tree = ComponentTree::new().unwrap();
    let a = tree.write(&DescriptorSpec::new("a").requires(["core.b"])).unwrap();
    let b = tree.write(&DescriptorSpec::new("b").requires(["core.a"])).unwrap();

    let mut manager = Manager::new(ModuleTable::new());
    manager.register(&a).unwrap();
    manager.register(&b).unwrap();

    let err = manager.list_ordered(true).unwrap_err();
    assert!(matches!(err, ComponentryError::Cycle { ref names } if names == &["core.a", "core.b"]));
    assert!(matches!(
        manager.list_dependents("core.a"),
        Err(ComponentryError::Cycle { .. })
    ));
    assert!(matches!(manager.instantiate_all(), Err(ComponentryError::Cycle { .. })));
    assert_eq!(manager.len(), 2);
}

#[test]
fn unregistered_requirements_are_tolerated() {
    let tree = ComponentTree::new().unwrap();
    let path = tree
        .write(&DescriptorSpec::new("a").requires(["core.missing"]))
        .unwrap();
    let mut manager = Manager::new(ModuleTable::new());
    manager.register(&path).unwrap();

    assert_eq!(manager.list_ordered(true).unwrap(), ["core.a"]);
}

#[test]
fn category_rejection_evicts_profile() {
    let tree = ComponentTree::new().unwrap();
    let path = tree.write(&DescriptorSpec::new("panel")).unwrap();
    let loader = ModuleTable::new()
        .with_module("panel", || ModuleExports::new().export("Widget", mock_factory("ui")));

    let mut manager = Manager::new(loader);
    manager.register(&path).unwrap();

    let err = manager.instantiate("core.panel").unwrap_err();
    assert!(matches!(err, ComponentryError::Interface { .. }));
    assert!(err.to_string().contains("matches no category"));
    assert!(!manager.contains("core.panel"));
}

#[test]
fn host_categories_accept_declared_capabilities() {
    let tree = ComponentTree::new().unwrap();
    let path = tree.write(&DescriptorSpec::new("panel")).unwrap();
    let loader = ModuleTable::new()
        .with_module("panel", || ModuleExports::new().export("Widget", mock_factory("ui")));

    let mut manager =
        Manager::new(loader).with_categories(Categories::default().with("QWidget", "ui"));
    manager.register(&path).unwrap();
    manager.instantiate("core.panel").unwrap();

    let profile = manager.profile("core.panel").unwrap();
    assert_eq!(profile.category(), Some("QWidget"));
    assert_eq!(profile.state(), ProfileState::Instantiated);
    assert_eq!(manager.filter(r"\.panel$", Some("QWidget")).unwrap(), ["core.panel"]);
}

#[test]
fn construction_failure_evicts_profile() {
    let tree = ComponentTree::new().unwrap();
    let path = tree.write(&DescriptorSpec::new("bad")).unwrap();
    let loader = ModuleTable::new().with_module("bad", || {
        ModuleExports::new().export("Widget", failing_factory("component"))
    });

    let mut manager = Manager::new(loader);
    manager.register(&path).unwrap();
    assert!(matches!(
        manager.instantiate("core.bad"),
        Err(ComponentryError::Interface { .. })
    ));
    assert!(manager.is_empty());
}

#[test]
fn instantiate_all_follows_dependency_order() {
    let (_tree, loader, mut manager) = diamond_manager();
    let mut seen = Vec::new();
    manager
        .instantiate_all_with(|profile| seen.push(profile.name().to_string()))
        .unwrap();

    assert_eq!(seen, DIAMOND);
    assert_eq!(loader.loads(), ["a", "b", "c", "d"]);
    for name in DIAMOND {
        let interface = manager.interface(name).unwrap();
        assert_eq!(interface.name(), name);
        assert!(interface.downcast_ref::<MockComponent>().is_some());
    }
}

#[test]
fn instantiate_all_reports_every_failure_and_keeps_successes() {
    let tree = ComponentTree::new().unwrap();
    tree.write(&DescriptorSpec::new("good")).unwrap();
    tree.write(&DescriptorSpec::new("orphan")).unwrap();
    tree.write(&DescriptorSpec::new("stray")).unwrap();
    let loader = RecordingLoader::with_mock_modules(["good"]);

    let mut manager = Manager::new(loader).with_paths([tree.root()]);
    manager.register_all().unwrap();

    let err = manager.instantiate_all().unwrap_err();
    assert!(matches!(
        err,
        ComponentryError::Instantiation { ref names } if names == &["core.orphan", "core.stray"]
    ));
    assert_eq!(manager.names().collect::<Vec<_>>(), ["core.good"]);
    assert!(manager.interface("core.good").is_some());
}

#[test]
fn bulk_registration_collects_failures() {
    let tree = ComponentTree::new().unwrap();
    tree.write(&DescriptorSpec::new("a")).unwrap();
    let broken = tree
        .write_raw("core/broken/broken.rc", "[Component]\nName = core.broken\n")
        .unwrap();
    let stray = tree
        .write(
            &DescriptorSpec::new("stray")
                .module("elsewhere")
                .without_module_source(),
        )
        .unwrap();
    tree.write_raw(".hidden/h/h.rc", "not a descriptor").unwrap();

    let mut manager = Manager::new(ModuleTable::new()).with_paths([tree.root()]);
    let err = manager.register_all().unwrap_err();

    match err {
        ComponentryError::Registration { paths } => {
            assert_eq!(paths, vec![broken, stray]);
        }
        other => panic!("expected registration error, got {other:?}"),
    }
    assert_eq!(manager.names().collect::<Vec<_>>(), ["core.a"]);
}

#[test]
fn register_paths_honors_extension() {
    let tree = ComponentTree::new().unwrap();
    tree.write(&DescriptorSpec::new("a")).unwrap();
    let spec = DescriptorSpec::new("b");
    tree.write_raw("core/b/b.desc", &spec.render()).unwrap();
    tree.write_raw("core/b/b.rs", "").unwrap();

    let mut manager = Manager::new(ModuleTable::new());
    let names = manager
        .register_paths(&[tree.root().to_path_buf()], "desc")
        .unwrap();
    assert_eq!(names, ["core.b"]);
}

#[test]
fn reregistration_replaces_profile() {
    let tree = ComponentTree::new().unwrap();
    let first = tree.write(&DescriptorSpec::new("a").version("1.0")).unwrap();
    let second = tree
        .write_raw("other/a/a.rc", &DescriptorSpec::new("a").version("2.0").render())
        .unwrap();
    tree.write_raw("other/a/a.rs", "").unwrap();

    let mut manager = Manager::new(ModuleTable::new());
    manager.register(&first).unwrap();
    manager.register(&second).unwrap();

    assert_eq!(manager.len(), 1);
    assert_eq!(manager.profile("core.a").unwrap().version(), "2.0");
}

#[test]
fn unregister_returns_profile_and_rejects_unknown() {
    let (_tree, _loader, mut manager) = diamond_manager();

    let profile = manager.unregister("core.c").unwrap();
    assert_eq!(profile.name(), "core.c");
    assert!(!manager.contains("core.c"));
    assert!(matches!(
        manager.unregister("core.c"),
        Err(ComponentryError::NotFound { .. })
    ));
}

#[test]
fn unregister_all_empties_the_registry() {
    let (_tree, _loader, mut manager) = diamond_manager();
    manager.unregister_all();

    assert!(manager.is_empty());
    assert!(manager.list_ordered(true).unwrap().is_empty());
}

#[test]
fn reload_visits_dependents_deepest_first() {
    let (_tree, loader, mut manager) = diamond_manager();
    manager.instantiate_all().unwrap();
    let before: Vec<u64> = DIAMOND
        .iter()
        .map(|name| manager.profile(name).unwrap().loaded_module().unwrap().generation())
        .collect();
    loader.clear();

    let reloaded = manager.reload("core.a").unwrap();

    assert_eq!(reloaded, ["core.d", "core.c", "core.b", "core.a"]);
    assert_eq!(loader.loads(), ["d", "c", "b", "a"]);
    for (name, previous) in DIAMOND.iter().zip(before) {
        let generation = manager.profile(name).unwrap().loaded_module().unwrap().generation();
        assert!(generation > previous, "{name} was not reloaded");
    }
}

#[test]
fn reload_of_leaf_touches_only_the_leaf() {
    let (_tree, loader, mut manager) = diamond_manager();
    manager.instantiate_all().unwrap();
    loader.clear();

    assert_eq!(manager.reload("core.d").unwrap(), ["core.d"]);
    assert_eq!(loader.loads(), ["d"]);
}

#[test]
fn failed_reload_keeps_previous_instance() {
    let tree = ComponentTree::new().unwrap();
    tree.diamond().unwrap();

    // Module b stops exporting its component after the first load.
    let loads_of_b = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads_of_b);
    let mut table = ModuleTable::new();
    for module in ["a", "c", "d"] {
        table.register(module, || {
            ModuleExports::new().export("Widget", mock_factory(Capability::COMPONENT))
        });
    }
    table.register("b", move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            ModuleExports::new().export("Widget", mock_factory(Capability::COMPONENT))
        } else {
            ModuleExports::new()
        }
    });

    let mut manager = Manager::new(table).with_paths([tree.root()]);
    manager.register_all().unwrap();
    manager.instantiate_all().unwrap();
    manager.interface_mut("core.b").unwrap().activate().unwrap();

    let reloaded = manager.reload("core.a").unwrap();
    assert_eq!(reloaded, ["core.d", "core.c", "core.a"]);
    assert_eq!(loads_of_b.load(Ordering::SeqCst), 2);
    assert!(manager.interface("core.b").unwrap().activated());
    assert_eq!(manager.profile("core.b").unwrap().category(), Some("Default"));
}

#[test]
fn filter_matches_names_by_regex() {
    let (_tree, _loader, manager) = diamond_manager();

    assert_eq!(manager.filter(r"\.[ab]$", None).unwrap(), ["core.a", "core.b"]);
    assert!(manager.filter("addons", None).unwrap().is_empty());
    assert!(manager.filter(".", Some("Default")).unwrap().is_empty());
}

#[test]
fn attribute_name_for_camel_cases_identifier() {
    assert_eq!(
        Manager::attribute_name_for("factory.componentsManagerUi"),
        "factoryComponentsManagerUi"
    );
    assert_eq!(Manager::attribute_name_for("myComponent"), "myComponent");
}

#[test]
fn queries_on_unknown_names_are_empty() {
    let (_tree, _loader, mut manager) = diamond_manager();
    assert!(manager.profile("core.ghost").is_none());
    assert!(manager.interface("core.ghost").is_none());
    assert!(manager.interface_mut("core.ghost").is_none());
    assert!(manager.interface("core.a").is_none());
}

#[test]
fn instantiation_adds_module_search_paths() {
    let (tree, _loader, mut manager) = diamond_manager();
    manager.instantiate("core.a").unwrap();

    let expected: Vec<PathBuf> = vec![tree.root().join("core/a")];
    assert_eq!(manager.search_paths(), expected.as_slice());
}
