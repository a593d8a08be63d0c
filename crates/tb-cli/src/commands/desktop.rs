//! Configured remote desktop

use anyhow::Result;

use tb_core::config::DesktopSettings;

use crate::output::{mask_secret, print_warning};

/// Describe the session the widget would open for these settings
pub fn format_desktop(desktop: &DesktopSettings) -> String {
    let descriptor = desktop.descriptor();
    let options = desktop.options();

    let url = if descriptor.has_address() {
        descriptor.address.as_str()
    } else {
        "(not set)"
    };
    let password = mask_secret(descriptor.secret.as_deref().unwrap_or_default());
    let mode = if options.interactive {
        "interactive"
    } else {
        "view-only"
    };
    let preview = if options.visible { "shown" } else { "hidden" };

    format!(
        "URL:      {}\nPassword: {}\nMode:     {}\nPreview:  {}\n",
        url, password, mode, preview
    )
}

/// Print the configured remote desktop
pub fn desktop_command(desktop: &DesktopSettings) -> Result<()> {
    if !desktop.descriptor().has_address() {
        print_warning("No desktop URL configured. Run 'takebridge workspace --save' to fetch it");
    }
    print!("{}", format_desktop(desktop));
    Ok(())
}
