// VM Assembly Loader: strips comments, resolves labels, produces the instruction list

use super::error::ParseError;
use crate::vm::instruction::Instruction;
use std::collections::HashMap;

const COMMENT_CHAR: char = ';';
const LABEL_SUFFIX: char = ':';

/// Result of parsing an assembly program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedProgram {
    pub instructions: Vec<Instruction>,
    pub labels: HashMap<String, usize>,
}

/// A source line with its comment and surrounding whitespace removed
#[derive(Debug, Clone, Copy)]
enum Line<'a> {
    Label(&'a str),
    Code(&'a str),
}

/// Split on `\n`, `\r\n` or a bare `\r`
fn source_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .flat_map(|line| line.strip_suffix('\r').unwrap_or(line).split('\r'))
}

/// Strip the comment and whitespace from each line, dropping blank lines.
/// Line numbers are 1-based and refer to the input text.
fn significant_lines(source: &str) -> impl Iterator<Item = (usize, Line<'_>)> {
    source_lines(source).enumerate().filter_map(|(i, raw)| {
        let text = match raw.split_once(COMMENT_CHAR) {
            Some((code, _)) => code,
            None => raw,
        }
        .trim();

        if text.is_empty() {
            None
        } else if let Some(label) = text.strip_suffix(LABEL_SUFFIX) {
            Some((i + 1, Line::Label(label.trim())))
        } else {
            Some((i + 1, Line::Code(text)))
        }
    })
}

/// Parses an air-conditioner assembly program from a string
pub fn parse_assembly(source: &str) -> Result<ParsedProgram, ParseError> {
    // First pass: collect labels; a label points at the index of the *next* instruction
    let mut labels = HashMap::new();
    let mut instruction_index = 0;
    for (line_num, line) in significant_lines(source) {
        match line {
            Line::Label("") => return Err(ParseError::EmptyLabel { line: line_num }),
            Line::Label(label) => {
                if labels.contains_key(label) {
                    return Err(ParseError::DuplicateLabel {
                        line: line_num,
                        label: label.to_string(),
                    });
                }
                labels.insert(label.to_string(), instruction_index);
            }
            Line::Code(_) => instruction_index += 1,
        }
    }

    // Second pass: tokenize instructions; commas count as whitespace
    let instructions: Vec<Instruction> = significant_lines(source)
        .filter_map(|(line_num, line)| match line {
            Line::Code(text) => Some((line_num, text)),
            Line::Label(_) => None,
        })
        .map(|(line_num, text)| {
            let mut tokens = text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty());
            // A code line is non-empty after trimming, but may be nothing but commas
            let opcode = tokens.next().unwrap_or_default();
            let operands = tokens.map(str::to_string).collect();
            Instruction::new(opcode, operands, line_num)
        })
        .collect();

    crate::debug_vm!(
        "Parsed {} instructions, {} labels",
        instructions.len(),
        labels.len()
    );
    Ok(ParsedProgram {
        instructions,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_program() {
        let source = r#"
        start:              ; Label definition
            LOAD_IMM T0, 5  ; Load a value
            inc T0
            JMP start       ; Jump to label
        "#;
        let program = parse_assembly(source).expect("program should parse");
        assert_eq!(program.instructions.len(), 3);
        assert_eq!(program.labels["start"], 0);
        assert_eq!(program.instructions[0].opcode, "LOAD_IMM");
        assert_eq!(program.instructions[0].operands, vec!["T0", "5"]);
        assert_eq!(program.instructions[1].opcode, "INC");
        assert_eq!(program.instructions[2].operands, vec!["start"]);
        assert_eq!(program.instructions[2].line, 5);
    }

    #[test]
    fn test_labels_point_at_next_instruction() {
        let source = "\
; header comment

LOAD_IMM T0, 1
first:
second:   ; two labels on the same slot
INC T0

end:
";
        let program = parse_assembly(source).unwrap();
        assert_eq!(program.instructions.len(), 2);
        assert_eq!(program.labels["first"], 1);
        assert_eq!(program.labels["second"], 1);
        // A trailing label resolves to one past the last instruction
        assert_eq!(program.labels["end"], 2);
    }

    #[test]
    fn test_commas_are_optional_and_collapsible() {
        let program = parse_assembly("ADD T0,T1 , T2\nADD T0 T1 T2\nADD T0,,T1,T2").unwrap();
        for instr in &program.instructions {
            assert_eq!(instr.operands, vec!["T0", "T1", "T2"]);
        }
    }

    #[test]
    fn test_operands_keep_their_case() {
        let program = parse_assembly("read_sensor T0, humidity").unwrap();
        assert_eq!(program.instructions[0].opcode, "READ_SENSOR");
        assert_eq!(program.instructions[0].operands, vec!["T0", "humidity"]);
    }

    #[test]
    fn test_duplicate_label() {
        let source = "loop:\nINC T0\nloop:\nHALT";
        assert_eq!(
            parse_assembly(source),
            Err(ParseError::DuplicateLabel {
                line: 3,
                label: "loop".to_string()
            })
        );
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(
            parse_assembly("HALT\n  :  ; nothing before the colon"),
            Err(ParseError::EmptyLabel { line: 2 })
        );
    }

    #[test]
    fn test_unresolved_jump_targets_are_not_checked_at_load() {
        let program = parse_assembly("JZ nowhere\nHALT").unwrap();
        assert_eq!(program.instructions.len(), 2);
        assert!(program.labels.is_empty());
    }

    #[test]
    fn test_unknown_opcodes_load_fine() {
        let program = parse_assembly("FROBNICATE T0").unwrap();
        assert_eq!(program.instructions[0].opcode, "FROBNICATE");
    }

    #[test]
    fn test_line_endings() {
        let unix = parse_assembly("start:\nINC T0\nJMP start\n").unwrap();
        let windows = parse_assembly("start:\r\nINC T0\r\nJMP start\r\n").unwrap();
        let classic_mac = parse_assembly("start:\rINC T0\rJMP start\r").unwrap();
        assert_eq!(unix, windows);
        assert_eq!(unix, classic_mac);
        assert_eq!(classic_mac.instructions.len(), 2);
        assert_eq!(classic_mac.instructions[1].line, 3);

        // A label that follows a bare CR still reports its own line
        let err = parse_assembly("a:\rINC T0\ra:").unwrap_err();
        assert_eq!(
            err,
            ParseError::DuplicateLabel {
                line: 3,
                label: "a".to_string()
            }
        );
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let source = "a:\nLOAD_IMM T0, 1\nb:\nJNZ a\nc:\nHALT";
        assert_eq!(parse_assembly(source), parse_assembly(source));
    }
}
