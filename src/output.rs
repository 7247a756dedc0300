use crate::bank::Bank;

// Writes the bank's accounts to the given stream, one canonical line per
// account, in the bank's current internal order. Callers sort first, and
// only open the output file once the session is over, so an aborted run
// never leaves a partial file behind.
pub fn write(mut output: impl std::io::Write, bank: &Bank) -> Result<(), std::io::Error> {
    for account in bank.accounts() {
        writeln!(output, "{account}")?;
    }

    Ok(())
}
