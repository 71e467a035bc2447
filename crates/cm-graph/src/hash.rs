use cm_core::errors::CmError;
use cm_core::Graph;
use sha2::{Digest, Sha256};

/// Computes the canonical structural hash of a multigraph.
///
/// The digest covers the vertex count and the sorted multiset of endpoint
/// pairs `(u, w)` with `u <= w`, read from the neighbour lists. Two graphs
/// hash equally exactly when they have the same vertex count and the same
/// edge multiset.
pub fn canonical_hash<G: Graph + ?Sized>(graph: &G) -> Result<String, CmError> {
    let mut hasher = Sha256::new();
    hasher.update(b"cm-multigraph");
    hasher.update((graph.vertex_count() as u64).to_le_bytes());

    let mut pairs: Vec<(u64, u64)> = Vec::new();
    for vertex in graph.vertices() {
        for neighbour in graph.neighbors(vertex)? {
            if vertex <= *neighbour {
                pairs.push((vertex.as_raw(), neighbour.as_raw()));
            }
        }
    }
    pairs.sort_unstable();
    hasher.update((pairs.len() as u64).to_le_bytes());
    for (low, high) in pairs {
        hasher.update(low.to_le_bytes());
        hasher.update(high.to_le_bytes());
    }

    Ok(format!("{:x}", hasher.finalize()))
}
