//! Search filtering for the price table.

use super::coin::Coin;

/// Coins whose name contains `term`, ignoring case.
///
/// Only the name is searched; symbol and id never match. Order follows
/// `coins` and an empty term keeps everything.
pub fn filter_by_name<'a>(coins: &'a [Coin], term: &str) -> Vec<&'a Coin> {
    let needle = term.to_lowercase();
    coins
        .iter()
        .filter(|coin| coin.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(names: &[&str]) -> Vec<Coin> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Coin::new((i + 1).to_string(), *name, "SYM", 1.0).unwrap())
            .collect()
    }

    fn names<'a>(filtered: &[&'a Coin]) -> Vec<&'a str> {
        filtered.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_eth_matches_both_ethereums_in_order() {
        let list = coins(&["Bitcoin", "Ethereum", "Ethereum Classic"]);
        let filtered = filter_by_name(&list, "eth");
        assert_eq!(names(&filtered), vec!["Ethereum", "Ethereum Classic"]);
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        let list = coins(&["Bitcoin", "Ethereum", "Tether"]);
        assert_eq!(filter_by_name(&list, "").len(), 3);
    }

    #[test]
    fn test_case_insensitive_both_sides() {
        let list = coins(&["BiTcOiN", "Litecoin"]);
        assert_eq!(names(&filter_by_name(&list, "BITCOIN")), vec!["BiTcOiN"]);
        assert_eq!(names(&filter_by_name(&list, "COIN")), vec!["BiTcOiN", "Litecoin"]);
    }

    #[test]
    fn test_substring_not_token_match() {
        let list = coins(&["Ethereum Classic", "Tether"]);
        assert_eq!(names(&filter_by_name(&list, "ther")), vec!["Ethereum Classic", "Tether"]);
    }

    #[test]
    fn test_symbol_and_id_are_not_searched() {
        let list = vec![Coin::new("btc", "Bitcoin", "XBT", 1.0).unwrap()];
        assert!(filter_by_name(&list, "xbt").is_empty());
        assert!(filter_by_name(&list, "btc").is_empty());
    }

    #[test]
    fn test_no_match() {
        let list = coins(&["Bitcoin"]);
        assert!(filter_by_name(&list, "doge").is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let list = coins(&["Bitcoin", "Ethereum", "Ethereum Classic", "Tether", "Bitcoin Cash"]);
        for term in ["", "eth", "coin", "c", "zzz", "ETHEREUM "] {
            let once: Vec<Coin> = filter_by_name(&list, term).into_iter().cloned().collect();
            let twice: Vec<Coin> = filter_by_name(&once, term).into_iter().cloned().collect();
            assert_eq!(once, twice, "term {:?}", term);
        }
    }

    #[test]
    fn test_result_is_exact_subset() {
        let list = coins(&["Bitcoin", "Ethereum", "Ethereum Classic", "Tether", "Bitcoin Cash"]);
        for term in ["b", "Eth", "ash", " "] {
            let expected: Vec<&str> = list
                .iter()
                .filter(|c| c.name.to_lowercase().contains(&term.to_lowercase()))
                .map(|c| c.name.as_str())
                .collect();
            assert_eq!(names(&filter_by_name(&list, term)), expected);
        }
    }
}
