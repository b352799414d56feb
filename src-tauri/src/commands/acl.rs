// Shared with build.rs, which generates one `allow-*` permission per command.

/// Every app command the invoke handler registers
pub const APP_COMMANDS: &[&str] = &[
    "browser_state",
    "new_tab",
    "activate_tab",
    "close_tab",
    "navigate",
    "go_back",
    "go_forward",
    "reload",
    "show_history",
    "get_history",
    "save_page_as",
    "page_serialized",
];

/// The only commands a tab's content webview may call
pub const CONTENT_COMMANDS: &[&str] = &["page_serialized"];
