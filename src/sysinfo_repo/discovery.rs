// Active network interface selection

/// What discovery knows about one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceCandidate {
    pub name: String,
    /// `None` when the platform does not report link state.
    pub is_up: Option<bool>,
    pub has_address: bool,
    /// Cumulative bytes in both directions.
    pub traffic: u64,
}

/// Picks the interface to display.
///
/// A configured name wins when it matches a candidate exactly or, ignoring
/// whitespace and case, one contains the other. Otherwise the busiest up,
/// addressed, non-loopback interface is chosen, falling back to any
/// non-loopback interface.
///
/// Matching is heuristic and can pick the wrong adapter on hosts with
/// several active links; configure the interface explicitly there.
pub fn pick_interface(preferred: Option<&str>, candidates: &[InterfaceCandidate]) -> Option<String> {
    if let Some(wanted) = preferred
        && let Some(found) = match_configured(wanted, candidates)
    {
        return Some(found);
    }

    let usable = candidates.iter().filter(|c| !is_loopback(&c.name));

    usable
        .clone()
        .filter(|c| c.is_up != Some(false) && c.has_address)
        .max_by(|a, b| a.traffic.cmp(&b.traffic).then_with(|| b.name.cmp(&a.name)))
        .or_else(|| usable.min_by(|a, b| a.name.cmp(&b.name)))
        .map(|c| c.name.clone())
}

fn match_configured(wanted: &str, candidates: &[InterfaceCandidate]) -> Option<String> {
    if let Some(exact) = candidates.iter().find(|c| c.name == wanted) {
        return Some(exact.name.clone());
    }
    let wanted = normalize(wanted);
    if wanted.is_empty() {
        return None;
    }
    candidates
        .iter()
        .find(|c| {
            let name = normalize(&c.name);
            name.contains(&wanted) || wanted.contains(&name)
        })
        .map(|c| c.name.clone())
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_loopback(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "lo" || lower.starts_with("lo0") || lower.contains("loopback")
}
