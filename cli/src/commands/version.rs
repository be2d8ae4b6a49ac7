//! Version command

use crate::output::{HumanRenderer, OutputContext};

/// Run the version command.
pub fn run(json: bool, quiet: bool) {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        println!(r#"{{"version":"{version}"}}"#);
    } else {
        HumanRenderer::new(&OutputContext::new(true, quiet)).render_version(version);
    }
}
