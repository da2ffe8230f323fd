//! Doctor referral: matched conditions → specialization tags → doctors.

use std::collections::HashSet;

use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::models::Doctor;

/// Find doctors for the given conditions via the specialization map.
///
/// Discovery order is preserved: conditions in caller order, each
/// condition's specialization tags in catalog order, the doctor
/// directory in directory order. Dedup is by doctor id. The result is
/// truncated to `top_n`. No matches is a valid outcome.
pub fn match_doctors<'a, I>(catalog: &CatalogStore, conditions: I, top_n: usize) -> Vec<Doctor>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut matched = Vec::new();

    for condition in conditions {
        for tag in catalog.specializations_for(condition) {
            for doc in catalog.doctors() {
                if doc.specialization.contains(tag) && seen.insert(doc.id) {
                    matched.push(doc.clone());
                }
            }
        }
    }

    matched.truncate(top_n);
    matched
}

/// Render a numbered doctor recommendation list.
pub fn render_doctor_list(doctors: &[Doctor]) -> String {
    let mut lines = vec!["Doctor Recommendation Based on symptoms:".to_string()];
    for (i, doc) in doctors.iter().enumerate() {
        lines.push(format!(
            "{}. {} ({}) – {}\n   Contact: {}\n   Image: {}",
            i + 1,
            doc.name,
            doc.qualification,
            doc.specialization.join(", "),
            doc.contact,
            doc.image.as_deref().unwrap_or("No image available"),
        ));
    }
    lines.join("\n")
}
