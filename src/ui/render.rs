// Plain-text rendering of the search screen
use crate::model::OfferRecord;
use crate::ui::state::{Phase, SearchUiState};
use crate::utils::{dedup_preserving_order, display_hostname};

use std::fmt::Write;

/// Hostnames for the sources footer. Malformed links are dropped silently.
pub fn source_hostnames(links: &[String]) -> Vec<String> {
    dedup_preserving_order(links.iter().filter_map(|link| display_hostname(link)))
}

/// One offer card. The cheapest offer carries the best-price badge.
pub fn render_offer(offer: &OfferRecord) -> String {
    let mut out = String::new();
    if offer.is_cheapest {
        out.push_str("★ أفضل سعر\n");
    }
    let _ = writeln!(out, "{}  —  {} {}", offer.store_name, offer.price, offer.currency);
    if !offer.notes.is_empty() {
        let _ = writeln!(out, "   {}", offer.notes);
    }
    if !offer.url.is_empty() {
        let _ = writeln!(out, "   شراء الآن: {}", offer.url);
    }
    out
}

/// Renders the whole screen. The idle screen is empty.
pub fn render_state(state: &SearchUiState) -> String {
    let mut out = String::new();
    match state.phase() {
        Phase::Idle => {}
        Phase::Loading => {
            out.push_str("جاري البحث عن أفضل الأسعار...\n");
            out.push_str("يتم البحث عبر Google للعثور على أحدث العروض\n");
        }
        Phase::ErrorShown => {
            out.push_str("حدث خطأ\n");
            if let Some(error) = &state.error {
                let _ = writeln!(out, "{}", error);
            }
        }
        Phase::ResultsShown => {
            let badge = if state.offers.is_empty() {
                "تقرير عام".to_string()
            } else {
                format!("{} متاجر", state.offers.len())
            };
            let _ = writeln!(out, "نتائج البحث  [{}]\n", badge);

            if state.offers.is_empty() {
                out.push_str("ملخص النتائج\n");
                out.push_str(&state.raw_text);
                if !state.raw_text.ends_with('\n') {
                    out.push('\n');
                }
            } else {
                for offer in &state.offers {
                    out.push_str(&render_offer(offer));
                    out.push('\n');
                }
            }

            if let Some(at) = state.searched_at {
                let _ = writeln!(out, "({})", at.format("%Y-%m-%d %H:%M UTC"));
            }

            let hosts = source_hostnames(&state.source_links);
            if !hosts.is_empty() {
                let _ = writeln!(out, "\nالمصادر: {}", hosts.join(" · "));
            }
        }
    }
    out
}
