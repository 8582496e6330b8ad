//! The `studyquiz home` command.

use anyhow::Result;

use studyquiz_core::pages::HomePage;

use super::command_for;

pub fn execute() -> Result<()> {
    let page = HomePage;

    println!("{}", HomePage::TITLE);
    println!("{}\n", HomePage::TAGLINE);

    for feature in HomePage::FEATURES {
        println!("  * {}: {}", feature.title, feature.description);
    }

    println!();
    for (label, route) in page.links() {
        println!("{label}: {}", command_for(&route));
    }

    Ok(())
}
