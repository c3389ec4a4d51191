//! Banner shown when `veil` runs without a subcommand.

use std::io::Write;

use console::style;

const LOGO: &str = r"
 __   __  ___  ___   _
 \ \ / / | __||_ _| | |
  \ V /  | _|  | |  | |__
   \_/   |___||___| |____|
";

/// One-line description of the tool.
pub const TAGLINE: &str = "Veil is an API key and other secrets manager";

/// Write the banner and a usage hint.
pub fn render(out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", style(LOGO).cyan().bold())?;
    writeln!(out, "  {}", TAGLINE)?;
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("usage: veil -k <passphrase> set <name> <value> | get <name>").dim()
    )?;
    Ok(())
}
