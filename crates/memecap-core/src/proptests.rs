use super::*;
use proptest::prelude::*;

/// Widths in quarter-ems, so sums at integer sizes stay exact
struct QuarterProbe;

impl WidthProbe for QuarterProbe {
    fn name(&self) -> &'static str {
        "quarter"
    }

    fn probe(&self, ch: char, _family: &FontFamily) -> Result<f32> {
        Ok(match ch {
            'i' | 'l' | ' ' => 0.25,
            'm' | 'w' => 0.75,
            _ => 0.5,
        })
    }
}

fn words_of(lines: &[Line]) -> Vec<String> {
    lines.iter().flat_map(|line| line.words().to_vec()).collect()
}

// Property: breaking never adds, drops, or reorders words
proptest! {
    #[test]
    fn prop_words_are_conserved(text in "[a-z ]{0,60}", budget in -50.0f32..400.0, size in 1u8..64) {
        let cache = MetricsCache::new();
        let measurer = TextMeasurer::new(&cache, &QuarterProbe);
        let lines = LineBreaker::new(measurer)
            .break_into_lines(&text, budget, &FontFamily::impact(), size as f32)
            .unwrap();

        let expected: Vec<String> = text.split(' ').map(str::to_string).collect();
        prop_assert_eq!(words_of(&lines), expected);
    }
}

// Property: a line only overflows when it is a single overlong word
proptest! {
    #[test]
    fn prop_lines_fit_budget(text in "[a-z ]{0,60}", budget in 1.0f32..400.0, size in 1u8..64) {
        let cache = MetricsCache::new();
        let measurer = TextMeasurer::new(&cache, &QuarterProbe);
        let family = FontFamily::impact();
        let lines = LineBreaker::new(measurer)
            .break_into_lines(&text, budget, &family, size as f32)
            .unwrap();

        for line in &lines {
            let width = line.width(&measurer, &family, size as f32).unwrap();
            prop_assert!(
                width <= budget || line.words().len() == 1,
                "{:?} is {}px wide, budget {}", line.text(), width, budget
            );
        }
    }
}

// Property: keys increase from line to line
proptest! {
    #[test]
    fn prop_keys_increase(text in "[a-z ]{0,60}", budget in -50.0f32..400.0) {
        let cache = MetricsCache::new();
        let measurer = TextMeasurer::new(&cache, &QuarterProbe);
        let lines = LineBreaker::new(measurer)
            .break_into_lines(&text, budget, &FontFamily::impact(), 20.0)
            .unwrap();

        prop_assert!(!lines.is_empty());
        for pair in lines.windows(2) {
            prop_assert!(pair[0].key() < pair[1].key());
        }
    }
}

// Property: measuring is additive over concatenation
proptest! {
    #[test]
    fn prop_measure_is_additive(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}", size in 1u8..64) {
        let cache = MetricsCache::new();
        let measurer = TextMeasurer::new(&cache, &QuarterProbe);
        let family = FontFamily::impact();
        let size = size as f32;

        let joined = measurer.measure(&format!("{}{}", a, b), &family, size).unwrap();
        let parts = measurer.measure(&a, &family, size).unwrap()
            + measurer.measure(&b, &family, size).unwrap();
        prop_assert_eq!(joined, parts);
    }
}

/// Ratios like real `advance / units_per_em` values, which binary floats
/// cannot hold exactly
struct UnevenProbe;

impl WidthProbe for UnevenProbe {
    fn name(&self) -> &'static str {
        "uneven"
    }

    fn probe(&self, ch: char, _family: &FontFamily) -> Result<f32> {
        Ok(0.3 + (ch as u32 % 17) as f32 * 0.0137)
    }
}

// Property: a budget measured off a word prefix keeps exactly that prefix on line 1
proptest! {
    #[test]
    fn prop_exact_prefix_budget_fills_first_line(
        words in prop::collection::vec("[A-Za-z]{1,8}", 1..7),
        cut in 0usize..7,
        size in 1.0f32..96.0,
    ) {
        let cache = MetricsCache::new();
        let measurer = TextMeasurer::new(&cache, &UnevenProbe);
        let family = FontFamily::impact();
        let cut = 1 + cut % words.len();

        let prefix = words[..cut].join(" ");
        let budget = measurer.measure(&format!("{} ", prefix), &family, size).unwrap();
        let lines = LineBreaker::new(measurer)
            .break_into_lines(&words.join(" "), budget, &family, size)
            .unwrap();

        prop_assert_eq!(lines[0].text(), prefix);
    }
}

// Property: the fit rule holds with uneven widths and fractional sizes
proptest! {
    #[test]
    fn prop_uneven_lines_fit_budget(text in "[a-zA-Z ]{0,60}", budget in 1.0f32..600.0, size in 1.0f32..96.0) {
        let cache = MetricsCache::new();
        let measurer = TextMeasurer::new(&cache, &UnevenProbe);
        let family = FontFamily::impact();
        let lines = LineBreaker::new(measurer)
            .break_into_lines(&text, budget, &family, size)
            .unwrap();

        let expected: Vec<String> = text.split(' ').map(str::to_string).collect();
        prop_assert_eq!(words_of(&lines), expected);
        for line in &lines {
            let width = line.width(&measurer, &family, size).unwrap();
            prop_assert!(
                width <= budget || line.words().len() == 1,
                "{:?} is {}px wide, budget {}", line.text(), width, budget
            );
        }
    }
}
