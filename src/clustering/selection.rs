use crate::models::Cluster;

pub fn find_cluster<'a>(clusters: &'a [Cluster], id: &str) -> Option<&'a Cluster> {
    clusters.iter().find(|cluster| cluster.id == id)
}

/// Carry a selection across a re-clustering pass.
///
/// Same membership keeps the same id, so that match comes first. When the
/// selected cluster split or merged, the selection follows its most recent
/// entry into whichever new cluster holds it. `None` once that entry is gone.
pub fn reconcile_selection(selected: Option<&Cluster>, clusters: &[Cluster]) -> Option<Cluster> {
    let selected = selected?;

    if let Some(same) = find_cluster(clusters, &selected.id) {
        return Some(same.clone());
    }

    let anchor = selected.primary()?;
    clusters
        .iter()
        .find(|cluster| cluster.contains(&anchor.id))
        .cloned()
}
