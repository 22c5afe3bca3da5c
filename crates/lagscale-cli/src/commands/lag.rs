use lagscale_eventstream::lag::unprocessed_in_partition;
use lagscale_eventstream::{Checkpoint, PartitionState};

/// Run the lag calculator on one synthetic partition.
pub fn lag(
    beginning: i64,
    last: i64,
    offset: &str,
    checkpoint_seq: Option<i64>,
    checkpoint_offset: Option<String>,
) -> anyhow::Result<()> {
    let partition = PartitionState {
        partition_id: "probe".to_string(),
        beginning_sequence: beginning,
        last_sequence: last,
        last_enqueued_offset: offset.to_string(),
    };

    let checkpoint = checkpoint_seq.map(|sequence_number| Checkpoint {
        offset: checkpoint_offset.unwrap_or_default(),
        sequence_number,
    });

    let count = unprocessed_in_partition(&partition, checkpoint.as_ref());

    match &checkpoint {
        Some(c) => println!(
            "unprocessed = {count} (last {last}, checkpoint seq {}, checkpoint offset {:?})",
            c.sequence_number, c.offset
        ),
        None => println!("unprocessed = {count} (window {beginning}..{last}, no checkpoint)"),
    }
    Ok(())
}
