use crate::model::OfferRecord;
use crate::utils::parse_price;

/// Sort key for an offer. Prices without any digits rank after every real price.
pub fn price_key(offer: &OfferRecord) -> f64 {
    parse_price(&offer.price).unwrap_or(f64::INFINITY)
}

/// Sorts offers by ascending price and marks the first one as cheapest.
///
/// The sort is stable, so equal prices keep their reply order and the earliest
/// of them wins the flag. Every other offer has its flag cleared.
pub fn rank_offers(offers: &mut [OfferRecord]) {
    if offers.is_empty() {
        return;
    }

    offers.sort_by(|a, b| price_key(a).total_cmp(&price_key(b)));

    for offer in offers.iter_mut() {
        offer.is_cheapest = false;
    }
    offers[0].is_cheapest = true;
}

/// The flagged offer, if any.
pub fn cheapest(offers: &[OfferRecord]) -> Option<&OfferRecord> {
    offers.iter().find(|o| o.is_cheapest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(store: &str, price: &str) -> OfferRecord {
        OfferRecord {
            store_name: store.to_string(),
            price: price.to_string(),
            currency: "SAR".to_string(),
            url: String::new(),
            notes: String::new(),
            is_cheapest: false,
        }
    }

    fn stores(offers: &[OfferRecord]) -> Vec<&str> {
        offers.iter().map(|o| o.store_name.as_str()).collect()
    }

    #[test]
    fn sorts_ascending_and_flags_first() {
        let mut offers = vec![offer("Jarir", "250"), offer("Noon", "199.00"), offer("Extra", "210")];
        rank_offers(&mut offers);

        assert_eq!(stores(&offers), ["Noon", "Extra", "Jarir"]);
        assert!(offers[0].is_cheapest);
        assert_eq!(offers.iter().filter(|o| o.is_cheapest).count(), 1);
        assert_eq!(cheapest(&offers).map(|o| o.store_name.as_str()), Some("Noon"));
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let mut offers = vec![offer("A", "100"), offer("B", "100.0"), offer("C", "90")];
        rank_offers(&mut offers);

        assert_eq!(stores(&offers), ["C", "A", "B"]);

        let mut tied = vec![offer("First", "50"), offer("Second", "50")];
        rank_offers(&mut tied);
        assert_eq!(stores(&tied), ["First", "Second"]);
        assert!(tied[0].is_cheapest);
        assert!(!tied[1].is_cheapest);
    }

    #[test]
    fn digitless_prices_sort_last() {
        let mut offers = vec![offer("Unknown", "call for price"), offer("Nice One", "75"), offer("Blank", "")];
        rank_offers(&mut offers);

        assert_eq!(stores(&offers), ["Nice One", "Unknown", "Blank"]);
        assert!(offers[0].is_cheapest);
    }

    #[test]
    fn all_unpriced_still_flags_first() {
        let mut offers = vec![offer("X", "?"), offer("Y", "-")];
        rank_offers(&mut offers);
        assert_eq!(stores(&offers), ["X", "Y"]);
        assert!(offers[0].is_cheapest);
    }

    #[test]
    fn empty_input_flags_nothing() {
        let mut offers: Vec<OfferRecord> = Vec::new();
        rank_offers(&mut offers);
        assert!(offers.is_empty());
        assert!(cheapest(&offers).is_none());
    }

    #[test]
    fn stale_flags_are_cleared() {
        let mut offers = vec![offer("A", "300"), offer("B", "100")];
        offers[0].is_cheapest = true;
        rank_offers(&mut offers);
        assert_eq!(stores(&offers), ["B", "A"]);
        assert!(!offers[1].is_cheapest);
    }
}
