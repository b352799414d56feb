include!("src/commands/acl.rs");

fn main() {
    println!("cargo:rerun-if-changed=src/commands/acl.rs");

    for command in CONTENT_COMMANDS {
        assert!(
            APP_COMMANDS.contains(command),
            "content command {command} is not an app command"
        );
    }

    tauri_build::try_build(
        tauri_build::Attributes::new()
            .app_manifest(tauri_build::AppManifest::new().commands(APP_COMMANDS)),
    )
    .expect("failed to run tauri-build");
}
