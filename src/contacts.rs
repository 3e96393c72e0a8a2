// src/contacts.rs
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use crate::config::LinkMode;
use crate::records::Contact;
use crate::signers::Signers;

/// Every first-signer ID across the transactions.
pub fn first_signer_ids(signers: &[Signers]) -> HashSet<i64> {
    signers.iter().filter_map(|s| s.first).collect()
}

/// Keep contacts whose join key is a first signer, in their original order.
#[instrument(level = "info", skip_all, fields(contacts = contacts.len(), ids = ids.len()))]
pub fn filter_contacts(contacts: &[Contact], ids: &HashSet<i64>) -> Vec<Contact> {
    let kept: Vec<Contact> = contacts
        .iter()
        .filter(|c| c.contact_id().is_some_and(|id| ids.contains(&id)))
        .cloned()
        .collect();
    info!(kept = kept.len(), dropped = contacts.len() - kept.len(), "filtered contacts");
    kept
}

/// Pair each transaction with its contact, if any.
pub fn link_contacts<'a>(
    signers: &[Signers],
    contacts: &'a [Contact],
    mode: LinkMode,
) -> Vec<Option<&'a Contact>> {
    let links: Vec<Option<&Contact>> = match mode {
        LinkMode::Explicit => signers
            .iter()
            .map(|s| {
                s.first
                    .and_then(|id| contacts.iter().find(|c| c.contact_id() == Some(id)))
            })
            .collect(),
        LinkMode::Positional => {
            if contacts.len() != signers.len() {
                warn!(
                    transactions = signers.len(),
                    contacts = contacts.len(),
                    "positional linking with unequal row counts; rows may be mis-linked"
                );
            }
            (0..signers.len()).map(|i| contacts.get(i)).collect()
        }
    };

    let unlinked = links.iter().filter(|l| l.is_none()).count();
    if unlinked > 0 {
        warn!(unlinked, "transactions without a linked contact");
    }
    debug!(linked = links.len() - unlinked, "linked contacts");
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(id: &str, name: &str) -> Contact {
        Contact {
            transaction_contact_id: Some(id.into()),
            full_name: Some(name.into()),
            ..Default::default()
        }
    }

    fn signer(first: Option<i64>) -> Signers {
        Signers {
            first,
            second: None,
        }
    }

    #[test]
    fn filter_keeps_order_and_is_idempotent() {
        let contacts = vec![
            contact("3", "C"),
            contact("1", "A"),
            contact("9", "Z"),
            contact("2", "B"),
        ];
        let ids = first_signer_ids(&[signer(Some(1)), signer(Some(2)), signer(Some(3)), signer(None)]);
        let once = filter_contacts(&contacts, &ids);
        let names: Vec<_> = once.iter().map(|c| c.full_name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert_eq!(filter_contacts(&once, &ids), once);
    }

    #[test]
    fn explicit_link_matches_by_key() {
        let contacts = vec![contact("2", "B"), contact("1", "A")];
        let signers = [signer(Some(1)), signer(None), signer(Some(2)), signer(Some(7))];
        let links = link_contacts(&signers, &contacts, LinkMode::Explicit);
        let names: Vec<Option<&str>> = links
            .iter()
            .map(|l| l.and_then(|c| c.full_name.as_deref()))
            .collect();
        assert_eq!(names, vec![Some("A"), None, Some("B"), None]);
    }

    #[test]
    fn duplicate_contact_ids_link_to_the_first_in_filter_order() {
        let contacts = vec![contact("1", "First"), contact("9", "Other"), contact("1", "Second")];
        let signers = [signer(Some(1))];
        let filtered = filter_contacts(&contacts, &first_signer_ids(&signers));
        assert_eq!(filtered.len(), 2);

        let links = link_contacts(&signers, &filtered, LinkMode::Explicit);
        assert_eq!(links[0].and_then(|c| c.full_name.as_deref()), Some("First"));
    }

    #[test]
    fn shared_contact_links_to_every_transaction() {
        let contacts = vec![contact("1", "A")];
        let signers = [signer(Some(1)), signer(Some(1))];
        let links = link_contacts(&signers, &contacts, LinkMode::Explicit);
        assert!(links.iter().all(|l| l.is_some()));
    }

    #[test]
    fn positional_link_uses_row_index() {
        let contacts = vec![contact("2", "B"), contact("1", "A")];
        let signers = [signer(Some(1)), signer(Some(2)), signer(Some(3))];
        let links = link_contacts(&signers, &contacts, LinkMode::Positional);
        let names: Vec<Option<&str>> = links
            .iter()
            .map(|l| l.and_then(|c| c.full_name.as_deref()))
            .collect();
        assert_eq!(names, vec![Some("B"), Some("A"), None]);
    }
}
