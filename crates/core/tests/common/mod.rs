//! On-disk fixtures shaped like a pod checkout

#![allow(dead_code)]

use pod_testing_core::interfaces::{BuildDriver, EnvironmentProbe, Sdk, Simulator};
use pod_testing_core::{Config, ExecutionPlan, Result, TestRunner};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const UNIT_TEST: &str = "com.apple.product-type.bundle.unit-test";
pub const APPLICATION: &str = "com.apple.product-type.application";

pub fn write_podspec(dir: &Path, name: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join(format!("{name}.podspec")),
        format!("Pod::Spec.new do |s|\n  s.name = '{name}'\nend\n"),
    )
    .unwrap();
}

/// A project bundle declaring the given `(name, product type)` targets
pub fn write_project(path: &Path, targets: &[(&str, &str)]) -> PathBuf {
    fs::create_dir_all(path).unwrap();
    let objects: String = targets
        .iter()
        .enumerate()
        .map(|(i, (name, product_type))| {
            format!(
                "\t\t{i:024X} /* {name} */ = {{\n\
                 \t\t\tisa = PBXNativeTarget;\n\
                 \t\t\tbuildPhases = (\n\t\t\t);\n\
                 \t\t\tname = \"{name}\";\n\
                 \t\t\tproductName = \"{name}\";\n\
                 \t\t\tproductType = \"{product_type}\";\n\
                 \t\t}};\n"
            )
        })
        .collect();
    fs::write(
        path.join("project.pbxproj"),
        format!(
            "// !$*UTF8*$!\n{{\n\tarchiveVersion = 1;\n\tclasses = {{\n\t}};\n\tobjectVersion = 46;\n\tobjects = {{\n\n/* Begin PBXNativeTarget section */\n{objects}/* End PBXNativeTarget section */\n\t}};\n\trootObject = 607FACC81AFB9204008FA782 /* Project object */;\n}}\n"
        ),
    )
    .unwrap();
    path.to_path_buf()
}

/// A shared scheme whose test action runs `blueprints`
pub fn write_shared_scheme(project: &Path, scheme: &str, blueprints: &[&str]) {
    let dir = project.join("xcshareddata").join("xcschemes");
    fs::create_dir_all(&dir).unwrap();
    let testables: String = blueprints
        .iter()
        .map(|b| {
            format!(
                r#"
         <TestableReference skipped = "NO">
            <BuildableReference
               BuildableIdentifier = "primary"
               BuildableName = "{b}.xctest"
               BlueprintName = "{b}"
               ReferencedContainer = "container:Project.xcodeproj">
            </BuildableReference>
         </TestableReference>"#
            )
        })
        .collect();
    fs::write(
        dir.join(format!("{scheme}.xcscheme")),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Scheme LastUpgradeVersion = "1500" version = "1.3">
   <TestAction buildConfiguration = "Debug">
      <Testables>{testables}
      </Testables>
   </TestAction>
</Scheme>
"#
        ),
    )
    .unwrap();
}

/// A workspace referencing `members` by `group:` location
pub fn write_workspace(path: &Path, members: &[&str]) -> PathBuf {
    fs::create_dir_all(path).unwrap();
    let refs: String = members
        .iter()
        .map(|m| format!("   <FileRef\n      location = \"group:{m}\">\n   </FileRef>\n"))
        .collect();
    fs::write(
        path.join("contents.xcworkspacedata"),
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Workspace\n   version = \"1.0\">\n{refs}</Workspace>\n"),
    )
    .unwrap();
    path.to_path_buf()
}

pub struct NoDevices;

impl EnvironmentProbe for NoDevices {
    fn simulators(&self) -> Result<Vec<Simulator>> {
        Ok(Vec::new())
    }

    fn sdks(&self) -> Result<Vec<Sdk>> {
        Ok(Vec::new())
    }
}

/// Build driver that records plans instead of building
#[derive(Clone, Default)]
pub struct RecordingDriver {
    pub plans: Arc<Mutex<Vec<ExecutionPlan>>>,
}

impl RecordingDriver {
    pub fn recorded(&self) -> Vec<ExecutionPlan> {
        self.plans.lock().unwrap().clone()
    }
}

impl BuildDriver for RecordingDriver {
    fn run(&self, plan: &ExecutionPlan) -> Result<()> {
        self.plans.lock().unwrap().push(plan.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "xcodebuild"
    }
}

pub fn runner(driver: &RecordingDriver) -> TestRunner {
    let config = Config {
        user: Some("pod-testing-fixture".to_string()),
        ..Config::default()
    };
    TestRunner::with_services(
        config,
        Box::new(pod_testing_core::services::PbxprojModel::new()),
        Box::new(NoDevices),
        Box::new(driver.clone()),
    )
}
