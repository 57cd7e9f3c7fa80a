// Instruction prompt sent with every search
use crate::config::MarketConfig;
use crate::parser::offer_parser::escape_field;

/// The line shape the parser expects, with placeholders for each value.
/// Configured values are escaped so the template itself parses back cleanly.
pub fn offer_line_template(market: &MarketConfig) -> String {
    let examples: Vec<String> = market.notes_examples.iter().map(|e| escape_field(e)).collect();
    format!(
        "STORE: [Store Name] | PRICE: [Numeric Price Only] | CURRENCY: {} | LINK: [Direct URL] | NOTES: [Short note in {}, e.g., {}]",
        escape_field(&market.currency_symbol),
        escape_field(&market.notes_language),
        examples.join(", ")
    )
}

/// Builds the instruction text. An empty query means the product is only shown in the image.
pub fn build_prompt(query: &str, market: &MarketConfig) -> String {
    let query = query.trim();
    let product = if query.is_empty() {
        "the product shown in the attached image".to_string()
    } else {
        format!("\"{}\"", query)
    };

    let mut stores = market.example_stores.join(", ");
    if !stores.is_empty() {
        stores.push_str(", or ");
    }

    format!(
        "You are a helpful shopping assistant for a user in {region}.\n\
         Task: Find the current cheapest online prices for the product described below.\n\
         Product: {product}\n\
         \n\
         1. Search the web using Google Search to find real, current prices.\n\
         2. Focus ONLY on stores that ship to {region} (e.g., {stores}major global sites shipping to {region}).\n\
         3. IMPORTANT: All prices MUST be in {currency_name} ({code} / {symbol}). If a price is in another currency, convert it to {code}.\n\
         4. Identify {count} different online stores selling this product.\n\
         5. STRICTLY output the results in the following specific format for each store (one per line). Do not use Markdown tables.\n\
         If a value contains the | character, write it as \\| instead.\n\
         \n\
         Format:\n\
         {template}\n\
         \n\
         6. If you cannot find exact prices, provide a helpful summary in {language} text.\n",
        region = market.region,
        product = product,
        stores = stores,
        currency_name = market.currency_name,
        code = market.currency_code,
        symbol = market.currency_symbol,
        count = market.store_count,
        template = offer_line_template(market),
        language = market.notes_language,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::OfferLineParser;

    #[test]
    fn prompt_embeds_query_and_rules() {
        let market = MarketConfig::default();
        let prompt = build_prompt("  iPhone 15 Pro Max ", &market);

        assert!(prompt.contains("Product: \"iPhone 15 Pro Max\""));
        assert!(prompt.contains("ship to Saudi Arabia (e.g., Amazon SA, Noon, Jarir, Extra, Nice One, or major"));
        assert!(prompt.contains("Saudi Riyals (SAR / ر.س)"));
        assert!(prompt.contains("at least 4-5 different online stores"));
        assert!(prompt.contains("Do not use Markdown tables."));
        assert!(prompt.contains(r"write it as \| instead"));
        assert!(prompt.contains(&offer_line_template(&market)));
    }

    #[test]
    fn image_only_prompt_points_at_the_image() {
        let prompt = build_prompt("", &MarketConfig::default());
        assert!(prompt.contains("Product: the product shown in the attached image"));
    }

    #[test]
    fn template_line_is_accepted_by_the_parser() {
        let market = MarketConfig::default();
        let offer = OfferLineParser::new()
            .parse_line(&offer_line_template(&market))
            .unwrap();
        assert_eq!(offer.store_name, "[Store Name]");
        assert_eq!(offer.currency, "ر.س");
        assert_eq!(offer.url, "[Direct URL]");
    }

    #[test]
    fn configured_pipes_are_escaped_in_the_template() {
        let market = MarketConfig {
            currency_symbol: "AED|د.إ".into(),
            notes_examples: vec!["VAT | incl.".into(), "free".into()],
            ..MarketConfig::default()
        };
        let template = offer_line_template(&market);
        assert!(template.contains(r"CURRENCY: AED\|د.إ |"));
        assert!(template.contains(r"e.g., VAT \| incl., free]"));

        let offer = OfferLineParser::new().parse_line(&template).unwrap();
        assert_eq!(offer.currency, "AED|د.إ");
        assert_eq!(offer.url, "[Direct URL]");
        assert_eq!(offer.notes, "[Short note in Arabic, e.g., VAT | incl., free]");
    }
}
