use lc2kasm::{assemble, read_source, write_file, Error};

const COUNT: &str = "\
\tlw      0       1       five    load reg1 with 5 (uses symbolic address)
        lw      1       2       3       load reg2 with -1 (uses numeric address)
start   add     1       2       1       decrement reg1
        beq     0       1       2       goto end of program when reg1==0
        beq     0       0       start   go back to the beginning of the loop
        noop
done    halt                            end of program
five    .fill   5
neg1    .fill   -1
stAddr  .fill   start                   will contain the address of start (2)
";

#[test]
fn count_program() {
    let out = assemble(COUNT).unwrap();
    assert_eq!(
        out.words,
        vec![
            8454151, 9043971, 655361, 16842754, 16842749, 29360128, 25165824, 5, -1, 2
        ]
    );
    assert_eq!(out.symbols.get("done"), Some(6));
}

#[test]
fn count_program_first_line_is_indented() {
    assert!(COUNT.starts_with('\t'));
    let out = assemble(COUNT).unwrap();
    assert_eq!(out.lines[0].label, None);
    assert_eq!(out.lines[0].opcode, "lw");
}

#[test]
fn unindented_line_starts_with_label() {
    // `lw` is taken as a label, leaving `0` in the opcode column
    let diag = assemble("lw 0 1 five\nfive\t.fill 5\n").unwrap_err();
    assert!(matches!(&diag.error, Error::UnsupportedOpcode(op) if op == "0"));
    assert_eq!(diag.line_idx, 0);
}

#[test]
fn one_word_per_line() {
    let source = "\n\tnoop\n\n\n\tnoop\nx\t.fill x\n   \n\thalt\n";
    let out = assemble(source).unwrap();
    let non_blank = source.lines().filter(|l| !l.trim().is_empty()).count();
    assert_eq!(out.words.len(), non_blank);
    assert_eq!(out.lines.len(), non_blank);
    // blank lines take no address
    assert_eq!(out.words[2], 2);
}

#[test]
fn forward_and_backward_labels() {
    let source = "\
\tbeq 0 0 end
top\tlw 0 1 data
\tsw 0 1 data
\tbeq 1 1 top
end\thalt
data\t.fill end
";
    let out = assemble(source).unwrap();
    let offset = |word: i32| (word & 0xFFFF) as u16 as i16;
    assert_eq!(offset(out.words[0]), 4 - 0 - 1);
    assert_eq!(offset(out.words[1]), 5);
    assert_eq!(offset(out.words[2]), 5);
    assert_eq!(offset(out.words[3]), 1 - 3 - 1);
    assert_eq!(out.words[5], 4);
}

#[test]
fn duplicate_label_reported_at_second_definition() {
    let source = "dup\tnoop\n\tnoop\ndup\thalt\n";
    let diag = assemble(source).unwrap_err();
    assert!(matches!(&diag.error, Error::DuplicateLabel(name) if name == "dup"));
    assert_eq!(diag.line_idx, 2);
}

#[test]
fn duplicate_label_wins_over_later_encoding_errors() {
    // pass 1 fails before pass 2 would see the bad register
    let source = "a\tadd 1 2 0\na\thalt\n";
    let diag = assemble(source).unwrap_err();
    assert!(matches!(diag.error, Error::DuplicateLabel(_)));
}

#[test]
fn error_points_at_source_line() {
    let source = "\tnoop\n\n\tlw 0 1 missing\n";
    let diag = assemble(source).unwrap_err();
    assert!(matches!(&diag.error, Error::UndefinedLabel(name) if name == "missing"));
    assert_eq!(diag.line_idx, 2);
    assert_eq!(diag.raw, "\tlw 0 1 missing");
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = dir.path().join("count.as");
    let output = dir.path().join("count.mc");
    std::fs::write(&input, COUNT).unwrap();

    let out = assemble(&read_source(&input).unwrap()).unwrap();
    write_file(&output, &out.words).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "8454151");
    assert_eq!(lines[8], "-1");
    assert!(text.ends_with('\n'));
}

#[test]
fn missing_input_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let result = read_source(&dir.path().join("nope.as"));
    assert!(matches!(result, Err(Error::FileOpen(..))));
}
