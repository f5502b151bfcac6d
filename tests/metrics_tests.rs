// Unit tests for speech-rate metrics and pace bucketing

use empathy_mirror::{PaceLabel, SpeechMetrics};

#[test]
fn test_empty_transcript_gives_zero_metrics() {
    let metrics = SpeechMetrics::compute("", 10);

    assert_eq!(metrics.word_count, 0);
    assert_eq!(metrics.words_per_minute, 0);
    assert_eq!(metrics.pace, PaceLabel::Slow);
}

#[test]
fn test_zero_elapsed_gives_zero_wpm() {
    // No division error, wpm pinned to 0
    let metrics = SpeechMetrics::compute("plenty of words spoken here", 0);

    assert_eq!(metrics.word_count, 5);
    assert_eq!(metrics.words_per_minute, 0);
    assert_eq!(metrics.pace, PaceLabel::Slow);
}

#[test]
fn test_word_count_is_whitespace_delimited() {
    let metrics = SpeechMetrics::compute("  I   feel  unheard \n sometimes today  ", 60);

    assert_eq!(metrics.word_count, 5);
    assert_eq!(metrics.words_per_minute, 5);
}

#[test]
fn test_six_words_in_three_seconds_is_normal_pace() {
    let metrics = SpeechMetrics::compute("I feel unheard sometimes today honestly", 3);

    assert_eq!(metrics.word_count, 6);
    assert_eq!(metrics.words_per_minute, 120);
    assert_eq!(metrics.pace, PaceLabel::Normal, "exactly 120 wpm is Normal, not Fast");
}

#[test]
fn test_wpm_is_rounded() {
    // 1 word in 7 seconds = 8.57 wpm, rounds to 9
    let metrics = SpeechMetrics::compute("hello", 7);
    assert_eq!(metrics.words_per_minute, 9);

    // 5 words in 2 seconds = 150 wpm exactly
    let metrics = SpeechMetrics::compute("one two three four five", 2);
    assert_eq!(metrics.words_per_minute, 150);
}

#[test]
fn test_pace_bucket_boundaries() {
    assert_eq!(PaceLabel::from_words_per_minute(0), PaceLabel::Slow);
    assert_eq!(PaceLabel::from_words_per_minute(119), PaceLabel::Slow);
    assert_eq!(PaceLabel::from_words_per_minute(120), PaceLabel::Normal);
    assert_eq!(PaceLabel::from_words_per_minute(160), PaceLabel::Normal);
    assert_eq!(PaceLabel::from_words_per_minute(161), PaceLabel::Fast);
    assert_eq!(PaceLabel::from_words_per_minute(240), PaceLabel::Fast);
}

#[test]
fn test_pace_labels_render_as_delivery_text() {
    assert_eq!(PaceLabel::Fast.as_str(), "Fast-paced");
    assert_eq!(PaceLabel::Normal.as_str(), "Normal pace");
    assert_eq!(PaceLabel::Slow.as_str(), "Slow/deliberate");
}
