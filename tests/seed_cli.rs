use std::process::Command;

#[test]
fn unreachable_store_exits_with_one() -> anyhow::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_product-seed"))
        .args(["--dsn", "", "--count", "10"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn invalid_count_is_a_usage_error() -> anyhow::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_product-seed"))
        .args(["--count", "lots"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
