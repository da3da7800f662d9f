use anyhow::Result;

use crate::commands::tree::report;
use crate::node::Side;
use crate::session::Session;

pub fn rotate(session: &mut Session, value: i32, direction: Side) -> Result<()> {
    let lifted = session.rotate(value, direction)?;
    println!("rotated {} {}, {} took its place", value, direction, lifted);

    report(session)
}
