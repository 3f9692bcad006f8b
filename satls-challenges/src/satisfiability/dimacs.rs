use anyhow::{anyhow, Result};
use std::fmt::Write;

/// Parses DIMACS CNF into `(num_variables, clauses)`.
///
/// Clauses are `0`-terminated and may span lines. A line starting with `%`
/// ends the input, as in the SATLIB benchmark files.
pub(crate) fn parse(text: &str) -> Result<(usize, Vec<Vec<i32>>)> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses = Vec::new();
    let mut clause = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            if header.is_some() {
                return Err(anyhow!("Duplicate problem line at line {}", line_idx + 1));
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 4 || fields[1] != "cnf" {
                return Err(anyhow!(
                    "Invalid problem line '{}' at line {}. Expected 'p cnf <variables> <clauses>'",
                    line,
                    line_idx + 1
                ));
            }
            let num_variables = fields[2]
                .parse::<usize>()
                .map_err(|e| anyhow!("Invalid variable count '{}': {}", fields[2], e))?;
            let num_clauses = fields[3]
                .parse::<usize>()
                .map_err(|e| anyhow!("Invalid clause count '{}': {}", fields[3], e))?;
            if num_variables > i32::MAX as usize {
                return Err(anyhow!("Too many variables: {}", num_variables));
            }
            header = Some((num_variables, num_clauses));
            continue;
        }

        let (num_variables, _) =
            header.ok_or_else(|| anyhow!("Clause before problem line at line {}", line_idx + 1))?;
        for token in line.split_whitespace() {
            let literal = token
                .parse::<i32>()
                .map_err(|e| anyhow!("Invalid literal '{}' at line {}: {}", token, line_idx + 1, e))?;
            if literal == 0 {
                clauses.push(std::mem::take(&mut clause));
            } else if literal.unsigned_abs() as usize > num_variables {
                return Err(anyhow!(
                    "Literal '{}' at line {} is out of range for {} variables",
                    literal,
                    line_idx + 1,
                    num_variables
                ));
            } else {
                clause.push(literal);
            }
        }
    }

    let (num_variables, num_clauses) =
        header.ok_or_else(|| anyhow!("Missing problem line 'p cnf <variables> <clauses>'"))?;
    if !clause.is_empty() {
        return Err(anyhow!("Last clause is not terminated by 0"));
    }
    if clauses.len() != num_clauses {
        return Err(anyhow!(
            "Invalid number of clauses. Expected: {}, Actual: {}",
            num_clauses,
            clauses.len()
        ));
    }
    Ok((num_variables, clauses))
}

pub(crate) fn write(num_variables: usize, clauses: &[Vec<i32>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "p cnf {} {}", num_variables, clauses.len());
    for clause in clauses {
        for literal in clause {
            let _ = write!(out, "{} ", literal);
        }
        out.push_str("0\n");
    }
    out
}
