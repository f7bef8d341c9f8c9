use super::*;
use crate::config::SessionConfig;

/// Canned backing stores: answers sync-page and text-extraction effects the
/// way the real host would, feeding completions straight back into `reduce`.
/// All other effects are collected for assertions.
struct Host {
    timesteps: Vec<u64>,
    text: Vec<char>,
}

impl Host {
    fn new(timesteps: Vec<u64>, text: &str) -> Self {
        Self {
            timesteps,
            text: text.chars().collect(),
        }
    }

    fn step(&self, session: &mut ReadAlongSession, message: Message) -> Vec<Effect> {
        let effects = session.reduce(message);
        self.respond(session, effects)
    }

    fn respond(&self, session: &mut ReadAlongSession, effects: Vec<Effect>) -> Vec<Effect> {
        let mut passed_through = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchSyncPage {
                    generation,
                    offset,
                    limit,
                } => {
                    let end = (offset + limit).min(self.timesteps.len());
                    let page = if offset < self.timesteps.len() {
                        self.timesteps[offset..end].to_vec()
                    } else {
                        Vec::new()
                    };
                    let follow = session.reduce(Message::SyncPageLoaded {
                        generation,
                        min_word_index: offset,
                        timesteps: page,
                    });
                    passed_through.extend(self.respond(session, follow));
                }
                Effect::ExtractText {
                    generation,
                    char_offset,
                    length,
                } => {
                    let end = (char_offset + length).min(self.text.len());
                    let chunk: String = if char_offset < self.text.len() {
                        self.text[char_offset..end].iter().collect()
                    } else {
                        String::new()
                    };
                    let follow = session.reduce(Message::TextChunkLoaded {
                        generation,
                        text: chunk,
                    });
                    passed_through.extend(self.respond(session, follow));
                }
                other => passed_through.push(other),
            }
        }
        passed_through
    }
}

fn small_config() -> SessionConfig {
    let mut config = SessionConfig::default();
    config.sync_cache_size = 7;
    config.sync_reload_threshold = 2;
    config.text_cache_chars = 64;
    config.text_reload_chars = 8;
    config
}

/// Eleven two-char words separated by single spaces: elements 0..=20, words
/// on even indices. Element 10 is the word "ff" starting at char 15.
const ELEVEN_WORDS: &str = "aa bb cc dd ee ff gg hh ii jj kk";

fn eleven_word_timesteps() -> Vec<u64> {
    let mut timesteps = vec![0u64; 10];
    timesteps.extend([0, 0, 0, 5, 5, 12, 20]);
    timesteps.extend([30, 30, 30, 30]);
    timesteps
}

fn loaded_session(host: &Host, config: SessionConfig, text: &str) -> ReadAlongSession {
    let mut session = ReadAlongSession::new("test-book", config);
    host.step(
        &mut session,
        Message::SectionLoaded {
            section_id: "sec-1".to_string(),
            text: text.to_string(),
        },
    );
    session
}

#[test]
fn section_load_tags_every_run() {
    let host = Host::new(Vec::new(), "");
    let mut session = ReadAlongSession::new("test-book", small_config());
    let effects = host.step(
        &mut session,
        Message::SectionLoaded {
            section_id: "sec-1".to_string(),
            text: "Hi there".to_string(),
        },
    );
    let tagged = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::TagWords { words, .. } => Some(words.clone()),
            _ => None,
        })
        .expect("tagged words");
    let ids: Vec<_> = tagged.iter().map(|word| word.id.as_str()).collect();
    assert_eq!(ids, vec!["word-0", "pre-word-1", "word-2"]);
    assert!(tagged[1].is_gap);
}

#[test]
fn equal_timesteps_resolve_over_consecutive_ticks() {
    let host = Host::new(eleven_word_timesteps(), ELEVEN_WORDS);
    let mut session = loaded_session(&host, small_config(), ELEVEN_WORDS);

    let effects = host.step(&mut session, Message::SeekToWord { word_index: 10 });
    assert_eq!(session.current_word(), Some(10));
    assert!(
        effects
            .iter()
            .any(|effect| matches!(effect, Effect::SeekAudio { seconds } if *seconds == 0.0))
    );
    assert!(effects.iter().any(|effect| matches!(
        effect,
        Effect::HighlightWord { word_index: 10, span } if span.start == 15 && span.end == 17
    )));

    host.step(&mut session, Message::Play);
    for _ in 0..5 {
        host.step(&mut session, Message::Tick);
    }
    // Elements 13 and 14 both carry timestep 5; five ticks reach 13 only.
    assert_eq!(session.current_word(), Some(13));
    host.step(&mut session, Message::Tick);
    assert_eq!(session.current_word(), Some(14));
}

#[test]
fn playhead_is_monotonic_and_clamps_at_the_table_end() {
    let host = Host::new(eleven_word_timesteps(), ELEVEN_WORDS);
    let mut session = loaded_session(&host, small_config(), ELEVEN_WORDS);
    host.step(&mut session, Message::SeekToWord { word_index: 10 });
    host.step(&mut session, Message::Play);

    let mut previous = session.current_word();
    for _ in 0..80 {
        host.step(&mut session, Message::Tick);
        let current = session.current_word();
        assert!(current >= previous, "playhead went backwards");
        previous = current;
    }
    assert_eq!(session.current_word(), Some(20));
}

#[test]
fn highlight_skips_gap_elements() {
    let host = Host::new(eleven_word_timesteps(), ELEVEN_WORDS);
    let mut session = loaded_session(&host, small_config(), ELEVEN_WORDS);
    host.step(&mut session, Message::SeekToWord { word_index: 10 });
    host.step(&mut session, Message::Play);

    // Tick 1 lands on element 11, the gap after "ff": no highlight event.
    let effects = host.step(&mut session, Message::Tick);
    assert_eq!(session.current_word(), Some(11));
    assert!(
        !effects
            .iter()
            .any(|effect| matches!(effect, Effect::HighlightWord { .. }))
    );

    // Tick 2 lands on element 12, the word "gg": highlighted.
    let effects = host.step(&mut session, Message::Tick);
    assert!(effects.iter().any(|effect| matches!(
        effect,
        Effect::HighlightWord { word_index: 12, .. }
    )));
}

#[test]
fn late_sync_page_after_seek_is_discarded() {
    let words: String = (0..600)
        .map(|i| format!("w{i:03}"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut session = ReadAlongSession::new("test-book", small_config());
    session.reduce(Message::SectionLoaded {
        section_id: "sec-1".to_string(),
        text: words.clone(),
    });

    let play_effects = session.reduce(Message::Play);
    let stale = play_effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchSyncPage {
                generation,
                offset,
                limit,
            } => Some((*generation, *offset, *limit)),
            _ => None,
        })
        .expect("initial sync fetch");
    assert_eq!(stale.1, 0);

    let seek_effects = session.reduce(Message::SeekToWord { word_index: 1000 });
    let fresh = seek_effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchSyncPage {
                generation, offset, ..
            } => Some((*generation, *offset)),
            _ => None,
        })
        .expect("post-seek sync fetch");
    assert_eq!(fresh.1, 1000);
    assert_ne!(stale.0, fresh.0);

    // The pre-seek page arrives late: dropped without anchoring anything.
    let effects = session.reduce(Message::SyncPageLoaded {
        generation: stale.0,
        min_word_index: stale.1,
        timesteps: vec![0; stale.2],
    });
    assert!(session.current_word().is_none());
    assert!(
        !effects
            .iter()
            .any(|effect| matches!(effect, Effect::SeekAudio { .. }))
    );

    // The post-seek page anchors the playhead and resumes.
    let effects = session.reduce(Message::SyncPageLoaded {
        generation: fresh.0,
        min_word_index: 1000,
        timesteps: (1000..1007).map(|step| step as u64).collect(),
    });
    assert_eq!(session.current_word(), Some(1000));
    assert!(session.is_playing());
    assert!(
        effects
            .iter()
            .any(|effect| matches!(effect, Effect::SeekAudio { seconds } if *seconds == 20.0))
    );
}

#[test]
fn highlight_catches_up_after_a_late_text_chunk() {
    let mut session = ReadAlongSession::new("test-book", small_config());
    session.reduce(Message::SectionLoaded {
        section_id: "sec-1".to_string(),
        text: "alpha beta.".to_string(),
    });

    let effects = session.reduce(Message::SeekToWord { word_index: 0 });
    let sync_fetch = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchSyncPage { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("sync fetch");
    let text_fetch = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ExtractText { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("text fetch");

    // The sync page anchors the seek, but the span is not resolvable yet.
    let effects = session.reduce(Message::SyncPageLoaded {
        generation: sync_fetch,
        min_word_index: 0,
        timesteps: vec![0, 0, 0, 0],
    });
    assert_eq!(session.current_word(), Some(0));
    assert!(
        !effects
            .iter()
            .any(|effect| matches!(effect, Effect::HighlightWord { .. }))
    );

    let effects = session.reduce(Message::TextChunkLoaded {
        generation: text_fetch,
        text: "alpha beta.".to_string(),
    });
    assert!(effects.iter().any(|effect| matches!(
        effect,
        Effect::HighlightWord { word_index: 0, span } if span.start == 0 && span.end == 5
    )));
}

#[test]
fn sentence_transition_reports_new_boundaries_and_zoom() {
    // Elements: Hi=0 gap=1 there=2 ". "=3 Go=4 gap=5 now=6 "."=7.
    let text = "Hi there. Go now.";
    let timesteps: Vec<u64> = (0..8).collect();
    let host = Host::new(timesteps, text);
    let mut config = small_config();
    config.zoom_enabled = true;
    let mut session = loaded_session(&host, config, text);

    host.step(&mut session, Message::SeekToWord { word_index: 0 });
    host.step(&mut session, Message::Play);
    for _ in 0..3 {
        host.step(&mut session, Message::Tick);
    }
    assert_eq!(session.current_word(), Some(3));

    let effects = host.step(&mut session, Message::Tick);
    assert_eq!(session.current_word(), Some(4));
    assert!(effects.iter().any(|effect| matches!(
        effect,
        Effect::SentenceBoundaries {
            prev: Some(0),
            curr: 4,
            next: 7,
        }
    )));
    assert!(
        effects
            .iter()
            .any(|effect| matches!(effect, Effect::ZoomToWord { word_index: 4 }))
    );
}

#[test]
fn skip_controls_seek_by_sentence() {
    let text = "Hi there. Go now.";
    let timesteps: Vec<u64> = vec![0; 8];
    let host = Host::new(timesteps, text);
    let mut session = loaded_session(&host, small_config(), text);

    host.step(&mut session, Message::SeekToWord { word_index: 6 });
    assert_eq!(session.current_word(), Some(6));

    // Mid-sentence skip backward goes to the start of the current sentence.
    host.step(&mut session, Message::SkipBackward);
    assert_eq!(session.current_word(), Some(4));
    // At the sentence start it crosses into the previous sentence.
    host.step(&mut session, Message::SkipBackward);
    assert_eq!(session.current_word(), Some(0));

    host.step(&mut session, Message::SkipForward);
    assert_eq!(session.current_word(), Some(3));
}

#[test]
fn tapping_a_tagged_word_seeks_to_it() {
    let text = "Hi there. Go now.";
    let host = Host::new(vec![0; 8], text);
    let mut session = loaded_session(&host, small_config(), text);

    host.step(
        &mut session,
        Message::WordTapped {
            id: "word-4".to_string(),
        },
    );
    assert_eq!(session.current_word(), Some(4));

    let effects = host.step(
        &mut session,
        Message::WordTapped {
            id: "bogus".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(session.current_word(), Some(4));
}

#[test]
fn restored_position_anchors_without_resuming() {
    let text = "Hi there. Go now.";
    let host = Host::new(vec![0; 8], text);
    let mut session = loaded_session(&host, small_config(), text);

    let effects = host.step(
        &mut session,
        Message::PositionRestored {
            word_index: Some(4),
        },
    );
    assert_eq!(session.current_word(), Some(4));
    assert!(!session.is_playing());
    assert!(
        effects
            .iter()
            .any(|effect| matches!(effect, Effect::SeekAudio { .. }))
    );
    assert!(
        !effects
            .iter()
            .any(|effect| matches!(effect, Effect::PlayAudio))
    );
}

#[test]
fn pausing_mid_seek_anchors_without_resuming() {
    let mut session = ReadAlongSession::new("test-book", small_config());
    session.reduce(Message::SectionLoaded {
        section_id: "sec-1".to_string(),
        text: "Hi there. Go now.".to_string(),
    });
    session.reduce(Message::Play);

    let effects = session.reduce(Message::SeekToWord { word_index: 4 });
    let generation = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchSyncPage { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("post-seek sync fetch");

    // Pause lands while the sync page is still in flight.
    session.reduce(Message::Pause);
    let effects = session.reduce(Message::SyncPageLoaded {
        generation,
        min_word_index: 4,
        timesteps: vec![0, 0, 0, 0],
    });
    assert_eq!(session.current_word(), Some(4));
    assert!(!session.is_playing());
    assert!(
        !effects
            .iter()
            .any(|effect| matches!(effect, Effect::PlayAudio))
    );
}

#[test]
fn close_session_cancels_io_and_goes_inert() {
    let mut session = ReadAlongSession::new("test-book", small_config());
    session.reduce(Message::SectionLoaded {
        section_id: "sec-1".to_string(),
        text: "Hi there".to_string(),
    });
    let token = session.io_token();

    let effects = session.reduce(Message::Play);
    let fetch = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchSyncPage { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("sync fetch");

    let effects = session.reduce(Message::CloseSession);
    assert!(
        effects
            .iter()
            .any(|effect| matches!(effect, Effect::PauseAudio))
    );
    assert!(token.is_cancelled());
    assert!(session.is_closed());

    // A completion arriving after teardown produces nothing.
    let effects = session.reduce(Message::SyncPageLoaded {
        generation: fetch,
        min_word_index: 0,
        timesteps: vec![0, 0, 0],
    });
    assert!(effects.is_empty());
    assert!(session.current_word().is_none());
}

#[test]
fn seek_outside_the_segmented_document_is_ignored() {
    let host = Host::new(vec![0; 8], "Hi there");
    let mut session = loaded_session(&host, small_config(), "Hi there");
    let effects = host.step(&mut session, Message::SeekToWord { word_index: 999 });
    assert!(effects.is_empty());
    assert!(session.current_word().is_none());
}

#[test]
fn rate_changes_are_clamped_and_forwarded() {
    let host = Host::new(vec![0; 8], "Hi there");
    let mut session = loaded_session(&host, small_config(), "Hi there");
    let effects = host.step(&mut session, Message::SetRate(99.0));
    assert!(
        effects
            .iter()
            .any(|effect| matches!(effect, Effect::SetAudioRate { rate } if *rate == 3.0))
    );
    assert!(
        effects
            .iter()
            .any(|effect| matches!(effect, Effect::SaveConfig))
    );
    assert_eq!(session.config().playback_rate, 3.0);
}
