use crate::error::{GatewayError, Result};
use crate::pipeline::error_table::ERROR_COLUMNS;
use crate::pipeline::row::{AlertRow, COLUMNS};

pub const SEPARATOR: char = ';';

/// Render the alarm table: header plus one line per row, each `\n`-terminated.
/// No rows means an empty body, not a bare header.
pub fn render_table(rows: &[AlertRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(32 * (rows.len() + 1));
    push_line(&mut out, COLUMNS.iter().copied());
    for row in rows {
        let values = row.values();
        push_line(&mut out, values.iter().map(String::as_str));
    }
    out
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(field);
    }
    out.push('\n');
}

/// A table as read back by a polling client.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedTable {
    Alarms(Vec<AlertRow>),
    Fault {
        code: i64,
        message: String,
        /// Request id and origin, e.g. `1@10.0.0.7`
        id: String,
    },
}

/// Parse either table shape the gateway serves.
pub fn parse_table(text: &str) -> Result<ParsedTable> {
    let mut lines = text.lines().filter(|l| !l.is_empty());

    let header = match lines.next() {
        Some(header) => header,
        None => return Ok(ParsedTable::Alarms(Vec::new())),
    };
    let columns: Vec<&str> = header.split(SEPARATOR).collect();

    if columns == ERROR_COLUMNS {
        let line = lines
            .next()
            .ok_or_else(|| malformed("error table without data line"))?;
        return parse_fault(line);
    }

    if columns != COLUMNS {
        return Err(malformed(&format!("unexpected header '{}'", header)));
    }

    lines.map(parse_row).collect::<Result<Vec<_>>>().map(ParsedTable::Alarms)
}

fn parse_row(line: &str) -> Result<AlertRow> {
    let fields: Vec<&str> = line.split(SEPARATOR).collect();
    if fields.len() != COLUMNS.len() {
        return Err(malformed(&format!(
            "expected {} columns, got {} in '{}'",
            COLUMNS.len(),
            fields.len(),
            line
        )));
    }

    Ok(AlertRow {
        clock: parse_number(fields[0], "clock")?,
        severity: parse_number(fields[1], "severity")?,
        suppressed: parse_number::<u8>(fields[2], "suppressed")? != 0,
        host_id: parse_number(fields[3], "hostid")?,
        host: fields[4].to_string(),
        name: fields[5].to_string(),
    })
}

fn parse_fault(line: &str) -> Result<ParsedTable> {
    // The message may itself contain separators; the outer columns are fixed.
    let (head, id) = line
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| malformed("short error line"))?;
    let (head, _data) = head
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| malformed("short error line"))?;
    let mut parts = head.splitn(3, SEPARATOR);
    let (_version, code, message) = match (parts.next(), parts.next(), parts.next()) {
        (Some(version), Some(code), Some(message)) => (version, code, message),
        _ => return Err(malformed("short error line")),
    };

    Ok(ParsedTable::Fault {
        code: parse_number(code, "error.code")?,
        message: message.to_string(),
        id: id.to_string(),
    })
}

fn parse_number<T: std::str::FromStr>(field: &str, column: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| malformed(&format!("invalid {} '{}'", column, field)))
}

fn malformed(message: &str) -> GatewayError {
    GatewayError::MalformedResponse(message.to_string())
}
