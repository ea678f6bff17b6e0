//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// A dependency declared in a test descriptor: `(name, slot, optional)`.
pub type Dep<'a> = (&'a str, &'a str, bool);

/// Write `<root>/<name as path>/<slot>/module.xml` declaring `deps`.
pub fn write_module(root: &Path, name: &str, slot: &str, deps: &[Dep<'_>]) {
    let dir = root.join(name.replace('.', "/")).join(slot);
    fs::create_dir_all(&dir).expect("failed to create module dir");

    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<module xmlns=\"urn:jboss:module:1.9\" name=\"{name}\">\n    <resources>\n        <resource-root path=\"{name}.jar\"/>\n    </resources>\n    <dependencies>\n"
    );
    for (dep, dep_slot, optional) in deps {
        xml.push_str(&format!(
            "        <module name=\"{dep}\" slot=\"{dep_slot}\" optional=\"{optional}\"/>\n"
        ));
    }
    xml.push_str("        <system export=\"true\"><paths><path name=\"sun/misc\"/></paths></system>\n");
    xml.push_str("    </dependencies>\n</module>\n");

    fs::write(dir.join("module.xml"), xml).expect("failed to write module.xml");
}

/// Write a module in the `main` slot whose dependencies are all required
/// and in `main`.
pub fn write_simple_module(root: &Path, name: &str, deps: &[&str]) {
    let deps: Vec<Dep<'_>> = deps.iter().map(|dep| (*dep, "main", false)).collect();
    write_module(root, name, "main", &deps);
}

/// Write a `<module-alias>` descriptor.
pub fn write_alias(root: &Path, name: &str, target: &str) {
    let dir = root.join(name.replace('.', "/")).join("main");
    fs::create_dir_all(&dir).expect("failed to create alias dir");
    fs::write(
        dir.join("module.xml"),
        format!(
            "<module-alias xmlns=\"urn:jboss:module:1.9\" name=\"{name}\" target-name=\"{target}\"/>\n"
        ),
    )
    .expect("failed to write alias");
}

/// Drop an empty file named `file` into a module's directory.
pub fn write_module_file(root: &Path, name: &str, slot: &str, file: &str) {
    let dir = root.join(name.replace('.', "/")).join(slot);
    fs::create_dir_all(&dir).expect("failed to create module dir");
    fs::write(dir.join(file), b"").expect("failed to write module file");
}

/// A small server layout:
///
/// ```text
/// org.jboss.as.server -> org.jboss.as.controller -> org.jboss.logging
///                     -> org.jboss.as.logging (subsystem) -> org.jboss.logmanager
///                     -> org.jboss.as.naming (subsystem) -> javax.api
/// org.jboss.as.ee (subsystem, unreachable) -> org.jboss.as.naming
/// ```
pub fn write_server_layout(root: &Path) {
    write_simple_module(
        root,
        "org.jboss.as.server",
        &[
            "org.jboss.as.controller",
            "org.jboss.as.logging",
            "org.jboss.as.naming",
        ],
    );
    write_simple_module(root, "org.jboss.as.controller", &["org.jboss.logging"]);
    write_simple_module(root, "org.jboss.logging", &[]);
    write_simple_module(root, "org.jboss.as.logging", &["org.jboss.logmanager"]);
    write_simple_module(root, "org.jboss.logmanager", &[]);
    write_simple_module(root, "org.jboss.as.naming", &["javax.api"]);
    write_simple_module(root, "javax.api", &[]);
    write_simple_module(root, "org.jboss.as.ee", &["org.jboss.as.naming"]);
}

/// Subsystems of [`write_server_layout`], one per line with a comment.
pub const SERVER_SUBSYSTEMS: &str =
    "# subsystems\norg.jboss.as.logging\norg.jboss.as.naming\norg.jboss.as.ee\n";

/// Run the modgraph binary in `dir` with colors disabled.
pub fn run_modgraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_modgraph"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute modgraph binary")
}

/// Stdout of a command that must have succeeded.
pub fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}
