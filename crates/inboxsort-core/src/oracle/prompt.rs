//! Prompt construction for label selection.

use crate::model::{CandidateItem, LabelCatalog};

/// Builds the label-selection prompt for one item.
///
/// Label names are listed one per line, verbatim, so names containing
/// commas stay unambiguous.
pub fn build(item: &CandidateItem, catalog: &LabelCatalog) -> String {
    let labels: String = catalog
        .names()
        .iter()
        .map(|name| format!("- {name}\n"))
        .collect();

    format!(
        "You are an email classification assistant.\n\
         Decide which single label from the list below is the closest match for the email.\n\
         \n\
         Available labels:\n\
         {labels}\
         \n\
         Email:\n\
         - From: {from}\n\
         - Subject: {subject}\n\
         - Body snippet: {body}\n\
         \n\
         Instructions:\n\
         1. Select the one label from the list whose topic is closest to the email.\n\
         2. If no label is a perfect match, pick the best approximation.\n\
         3. Respond with ONLY the exact label name as written in the list, with no quotes or explanation.\n",
        from = item.from,
        subject = item.subject,
        body = item.body_excerpt,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Label;

    #[test]
    fn test_prompt_contains_item_and_every_label() {
        let item = CandidateItem {
            id: "m1".into(),
            from: "Billing <billing@acme.test>".into(),
            subject: "Invoice #42".into(),
            body_excerpt: "Amount due: 120 EUR".into(),
        };
        let catalog = LabelCatalog::from_labels([
            Label::user("L1", "Finance"),
            Label::user("L2", "Travel, Trips"),
        ]);

        let prompt = build(&item, &catalog);
        assert!(prompt.contains("- Finance\n- Travel, Trips\n"));
        assert!(prompt.contains("- From: Billing <billing@acme.test>\n"));
        assert!(prompt.contains("- Subject: Invoice #42\n"));
        assert!(prompt.contains("- Body snippet: Amount due: 120 EUR\n"));
        assert!(prompt.contains("ONLY the exact label name"));
    }

    #[test]
    fn test_prompt_lists_each_label_once_in_order() {
        let item = CandidateItem {
            id: "m1".into(),
            from: String::new(),
            subject: "s".into(),
            body_excerpt: "b".into(),
        };
        let catalog = LabelCatalog::from_labels([
            Label::user("L1", "Work"),
            Label::user("L2", "Receipts"),
            Label::user("L3", "Family"),
        ]);

        let prompt = build(&item, &catalog);
        let listed: Vec<&str> = prompt
            .lines()
            .skip_while(|line| *line != "Available labels:")
            .skip(1)
            .take_while(|line| !line.is_empty())
            .collect();
        assert_eq!(listed, ["- Work", "- Receipts", "- Family"]);
    }

    #[test]
    fn test_prompt_with_empty_headers() {
        let item = CandidateItem {
            id: "m2".into(),
            from: String::new(),
            subject: String::new(),
            body_excerpt: "hi".into(),
        };
        let catalog = LabelCatalog::from_labels([Label::user("L1", "Personal")]);

        let prompt = build(&item, &catalog);
        assert!(prompt.contains("- From: \n- Subject: \n"));
    }
}
