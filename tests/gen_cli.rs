use std::process::Command;

fn gen(args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new(env!("CARGO_BIN_EXE_gen")).args(args).output()?;
    assert!(output.status.success());
    Ok(String::from_utf8(output.stdout)?)
}

#[test]
fn writes_one_copy_line_per_row() -> anyhow::Result<()> {
    let out = gen(&["--count", "1000", "--seed", "3"])?;

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1_000);
    for line in lines {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 3);
        assert!(fields[1].starts_with(&format!("{} - ", fields[0])));
        assert!(fields[2].parse::<f64>().is_ok());
    }
    Ok(())
}

#[test]
fn seeded_output_is_reproducible() -> anyhow::Result<()> {
    let a = gen(&["--count", "50", "--seed", "11"])?;
    let b = gen(&["--count", "50", "--seed", "11"])?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn zero_count_prints_nothing() -> anyhow::Result<()> {
    assert!(gen(&["--count", "0"])?.is_empty());
    Ok(())
}
