//! Plain-text rendering of the location tree.

use std::fmt;

use stockroom_domain::location::Location;

/// Render every location with its counters and areas, in stored order.
#[must_use]
pub fn render(locations: &[Location]) -> String {
    Report(locations).to_string()
}

/// Text view of a slice of locations.
struct Report<'a>(&'a [Location]);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "no locations");
        }
        for location in self.0 {
            match &location.address {
                Some(address) => writeln!(f, "{} ({address}) [{}]", location.name, location.id)?,
                None => writeln!(f, "{} [{}]", location.name, location.id)?,
            }
            for counter in &location.counters {
                writeln!(f, "  {} ({} areas)", counter.name, counter.areas.len())?;
                for area in &counter.areas {
                    match area.display_order {
                        Some(order) => write!(f, "    [{order}]")?,
                        None => write!(f, "    [-]")?,
                    }
                    writeln!(
                        f,
                        " {}: {} records",
                        area.name,
                        area.inventory_records.len()
                    )?;
                }
            }
        }
        Ok(())
    }
}
