#[cfg(test)]
mod integration_tests {
    use super::fixtures::{engine, source};
    use crate::{
        CHAR_COMBINATION_PENALTY, DataConfig, INFERRED_SPACE_FACTOR, Segmenters, TokenizeOptions,
        WordFreq, frequency::round_to_significant_digits, simple_tokenize,
    };
    use flate2::{Compression, write::GzEncoder};
    use rmpv::Value;
    use std::{fs::File, io::Write, path::Path};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn harmonic(freqs: &[f64]) -> f64 {
        1.0 / freqs.iter().map(|f| 1.0 / f).sum::<f64>()
    }

    #[test]
    fn chinese_word_in_table() -> TestResult {
        let wf = engine();
        assert_eq!(wf.word_frequency("我们", "zh", "small", 0.0)?, 0.1);
        Ok(())
    }

    #[test]
    fn chinese_characters_stand_in_for_unknown_words() -> TestResult {
        let wf = engine();
        let (p1, p2) = (0.01, 0.01);
        let expected = round_to_significant_digits(harmonic(&[p1, p2]) / CHAR_COMBINATION_PENALTY, 0.0);
        assert_eq!(wf.word_frequency("中文", "zh", "small", 0.0)?, expected);
        assert_eq!(expected, 0.00167);
        Ok(())
    }

    #[test]
    fn unknown_character_defeats_the_estimate() -> TestResult {
        let wf = engine();
        assert_eq!(wf.word_frequency("中国", "zh", "small", 0.0)?, 0.0);
        Ok(())
    }

    #[test]
    fn inferred_boundaries_are_penalized() -> TestResult {
        let wf = engine();
        let tokens = wf.lossy_tokenize("我们汉语", "zh", TokenizeOptions::default())?;
        assert_eq!(tokens, ["我们", "汉语"]);

        let merged = harmonic(&[0.1, 10f64.powf(-1.5)]);
        let expected = round_to_significant_digits(merged / INFERRED_SPACE_FACTOR, 0.0);
        assert_eq!(wf.word_frequency("我们汉语", "zh", "small", 0.0)?, expected);
        Ok(())
    }

    #[test]
    fn spaced_phrases_get_no_boundary_penalty() -> TestResult {
        let wf = engine();
        let expected = round_to_significant_digits(harmonic(&[10f64.powf(-1.5); 2]), 0.0);
        assert_eq!(wf.word_frequency("of and", "en", "small", 0.0)?, expected);
        Ok(())
    }

    #[test]
    fn traditional_and_simplified_meet() -> TestResult {
        let wf = engine();
        let traditional = wf.word_frequency("漢語", "zh", "small", 0.0)?;
        let simplified = wf.word_frequency("汉语", "zh", "small", 0.0)?;
        assert!(simplified > 0.0);
        assert_eq!(traditional, simplified);
        Ok(())
    }

    #[test]
    fn traditional_tag_skips_simplification() -> TestResult {
        let wf = engine();
        let tokens = wf.lossy_tokenize("漢語", "zh-Hant", TokenizeOptions::default())?;
        assert_eq!(tokens, ["漢語"]);
        Ok(())
    }

    #[test]
    fn chinese_without_segmenter_still_answers() -> TestResult {
        let wf = WordFreq::new(source(), Segmenters::unavailable());
        let tokens = wf.tokenize("中文", "zh", TokenizeOptions::default());
        assert_eq!(tokens, ["中", "文"]);
        // two known characters, one inferred boundary
        let expected = round_to_significant_digits(harmonic(&[0.01, 0.01]) / INFERRED_SPACE_FACTOR, 0.0);
        assert_eq!(wf.word_frequency("中文", "zh", "small", 0.0)?, expected);
        Ok(())
    }

    #[test]
    fn hello_world_tokens() {
        let tokens = simple_tokenize("Hello, world!", false);
        assert_eq!(tokens, ["hello", "world"]);
        let with_punct = simple_tokenize("Hello, world!", true);
        assert_eq!(with_punct, ["hello", ",", "world", "!"]);
    }

    fn write_table(path: &Path, buckets: &[&[&str]]) -> TestResult {
        let header = Value::Map(vec![
            (Value::from("format"), Value::from("cB")),
            (Value::from("version"), Value::from(1)),
        ]);
        let mut items = vec![header];
        items.extend(
            buckets
                .iter()
                .map(|b| Value::Array(b.iter().map(|w| Value::from(*w)).collect())),
        );
        let mut packed = Vec::new();
        rmpv::encode::write_value(&mut packed, &Value::Array(items))?;
        let mut gz = GzEncoder::new(File::create(path)?, Compression::default());
        gz.write_all(&packed)?;
        gz.finish()?;
        Ok(())
    }

    #[test]
    fn end_to_end_from_a_data_directory() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut buckets: Vec<&[&str]> = vec![&[]; 200];
        buckets[100] = &["the"];
        buckets[199] = &["cat", "dog"];
        write_table(&dir.path().join("small_en.msgpack.gz"), &buckets)?;
        write_table(&dir.path().join("large_en.msgpack.gz"), &buckets[..101])?;

        let wf = WordFreq::open(DataConfig::new(dir.path()))?;
        assert_eq!(wf.word_frequency("The", "en", "small", 0.0)?, 0.1);
        assert_eq!(wf.zipf_frequency("the", "en", "best", 0.0)?, 8.0);
        assert_eq!(wf.word_frequency("cat", "en", "best", 0.0)?, 0.0);
        assert!(wf.word_frequency("cat", "en", "small", 0.0)? > 0.0);
        assert_eq!(wf.top_n_list("en", 5, "small", false)?, ["the", "cat", "dog"]);
        assert_eq!(wf.available_languages("best")?.len(), 1);
        Ok(())
    }
}
