//! Compile-time package registry tests

use darkmagic_domain::ports::ArtifactLoader;
use darkmagic_domain::value_objects::{Artifact, Origin, Value};
use darkmagic_providers::packages::{find_package, list_packages};
use darkmagic_providers::{ModuleLoader, PACKAGES, PackageEntry};

#[linkme::distributed_slice(PACKAGES)]
static BUILD_INFO: PackageEntry = PackageEntry {
    name: "build-info",
    description: "Version of the test build",
    export: || Artifact::value(String::from("0.2.0")),
};

#[test]
fn test_registered_package_is_listed() {
    assert!(find_package("build-info").is_some());
    assert!(find_package("no-such-package").is_none());
    assert!(
        list_packages()
            .iter()
            .any(|(name, description)| *name == "build-info" && !description.is_empty())
    );
}

#[tokio::test]
async fn test_compile_time_package_is_loaded_through_train_case() {
    let loader = ModuleLoader::new();

    let loaded = loader.load("buildInfo", &[]).await.unwrap().unwrap();

    assert_eq!(loaded.origin, Origin::External);
    assert_eq!(loaded.locator.as_str(), "pkg:build-info");
    match loaded.artifact {
        Artifact::Value(value) => assert_eq!(value.downcast_ref::<String>().unwrap(), "0.2.0"),
        other => panic!("unexpected artifact {other:?}"),
    }
}

#[tokio::test]
async fn test_runtime_package_shadows_compile_time_one() {
    let loader = ModuleLoader::new();
    loader.register_package("build-info", Value::new(String::from("dev")));

    let loaded = loader.load("build-info", &[]).await.unwrap().unwrap();
    match loaded.artifact {
        Artifact::Value(value) => assert_eq!(value.downcast_ref::<String>().unwrap(), "dev"),
        other => panic!("unexpected artifact {other:?}"),
    }
}
