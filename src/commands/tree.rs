use anyhow::Result;

use crate::printer::Printer;
use crate::session::Session;

pub fn show(session: &mut Session) -> Result<()> {
    Printer::new(session.annotated()).print()?;

    Ok(())
}

pub fn add(session: &mut Session) -> Result<()> {
    let value = session.add_node()?;
    println!("added {}", value);

    report(session)
}

pub fn new(session: &mut Session) -> Result<()> {
    session.reset()?;

    report(session)
}

pub fn dump(session: &mut Session) -> Result<()> {
    let snapshot = session.annotated().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}

/// Prints the tree followed by how far it is from being balanced.
pub fn report(session: &mut Session) -> Result<()> {
    let annotated = session.annotated();
    Printer::new(annotated).print()?;

    let tree = annotated.tree();
    let unbalanced = annotated
        .unbalanced()
        .map(|id| tree.get(id).map(|node| node.value().to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    if unbalanced.is_empty() {
        println!("the tree is balanced, try adding a node");
    } else {
        println!("unbalanced nodes: {}", unbalanced.join(", "));
    }

    Ok(())
}
