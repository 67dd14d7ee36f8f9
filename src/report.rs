//! Results formatter: the other external collaborator named at the core
//! spec's interface. Field order is significant — drivers downstream of
//! this crate parse it positionally.

use std::io::{self, Write};

use crate::engine::Criterias;

/// Write the five-line, field-order-significant report to `out`.
pub fn format_criterias<W: Write>(criterias: &Criterias, mut out: W) -> io::Result<()> {
    writeln!(out, "downtime: {}", criterias.downtime)?;
    writeln!(out, "eviction time: {}", criterias.eviction_time)?;
    writeln!(out, "total_migration time: {}", criterias.total_migration_time)?;
    writeln!(out, "transmitted data: {}", criterias.transmitted_data)?;
    writeln!(out, "delays: {}", criterias.delays)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_five_lines_in_the_contracted_order() {
        let c = Criterias {
            downtime: 1.0,
            delays: 2.0,
            total_migration_time: 3.0,
            transmitted_data: 4.0,
            eviction_time: 5.0,
        };
        let mut buf = Vec::new();
        format_criterias(&c, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "downtime: 1");
        assert_eq!(lines[1], "eviction time: 5");
        assert_eq!(lines[2], "total_migration time: 3");
        assert_eq!(lines[3], "transmitted data: 4");
        assert_eq!(lines[4], "delays: 2");
    }
}
