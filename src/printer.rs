use std::io::{self, Write};

use anyhow::Result;

use crate::annotated::Annotated;
use crate::node::{NodeId, Side};

pub struct Printer<'a> {
    annotated: Annotated<'a>,
}

impl<'a> Printer<'a> {
    pub fn new(annotated: Annotated<'a>) -> Self {
        Self { annotated }
    }

    pub fn print(&self) -> Result<()> {
        // render fully first so a write error doesn't leave half a tree on screen
        let buf = self.render()?;
        print!("{}", buf);

        Ok(())
    }

    pub fn render(&self) -> Result<String> {
        let mut buf = Vec::new();

        self.print_node(&mut buf, self.annotated.root())?;
        writeln!(buf)?;
        self.print_children(&mut buf, self.annotated.root(), "")?;

        Ok(String::from_utf8(buf)?)
    }

    fn print_children(&self, f: &mut impl io::Write, id: NodeId, prefix: &str) -> Result<()> {
        let node = self.annotated.tree().get(id)?;
        if node.is_leaf() {
            return Ok(());
        }

        for side in [Side::Left, Side::Right] {
            let last = side == Side::Right;
            let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
            let tag = match side {
                Side::Left => 'L',
                Side::Right => 'R',
            };

            write!(f, "{}{}{} ", prefix, branch, tag)?;

            match node.child(side) {
                Some(child) => {
                    self.print_node(f, child)?;
                    writeln!(f)?;
                    self.print_children(f, child, &format!("{}{}", prefix, indent))?;
                }
                None => writeln!(f, "-")?,
            }
        }

        Ok(())
    }

    fn print_node(&self, f: &mut impl io::Write, id: NodeId) -> Result<()> {
        let node = self.annotated.tree().get(id)?;
        let annotation = self.annotated.get(id)?;

        write!(
            f,
            "{} (id {}, h {}, bf {:+})",
            node.value(),
            annotation.position_id,
            annotation.height,
            annotation.balance_factor
        )?;

        if annotation.balance_factor.abs() > 1 {
            write!(f, " !")?;
        }

        Ok(())
    }
}
