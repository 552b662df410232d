use vitrina_client::CrudApi;
use vitrina_view::Coordinator;

/// Apply `--set field=value` pairs to the coordinator's draft.
pub fn apply<A: CrudApi>(
    coordinator: &mut Coordinator<A>,
    assignments: &[(String, String)],
) -> anyhow::Result<()> {
    for (field, value) in assignments {
        coordinator.set(field, value.as_str())?;
    }
    Ok(())
}
