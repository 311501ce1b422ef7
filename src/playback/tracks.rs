use super::PlaybackError;

/// Ordered, fixed playlist for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackList {
    tracks: Vec<String>,
}

impl TrackList {
    pub fn new(tracks: Vec<String>) -> Result<Self, PlaybackError> {
        if tracks.is_empty() {
            return Err(PlaybackError::EmptyTrackList);
        }
        if let Some(index) = tracks.iter().position(|t| t.trim().is_empty()) {
            return Err(PlaybackError::BlankTrack { index });
        }
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Resource path of the track at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tracks.get(index).map(String::as_str)
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }

    pub fn display_name(&self, index: usize) -> String {
        self.get(index).map(track_display_name).unwrap_or_default()
    }
}

/// Human-readable name for a track resource: the file name with directory,
/// query string and final extension removed.
pub fn track_display_name(resource: &str) -> String {
    let without_query = resource
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let file_name = without_query
        .rsplit('/')
        .next()
        .unwrap_or(without_query);

    match file_name.rfind('.') {
        Some(dot) if dot > 0 => file_name[..dot].to_string(),
        _ => file_name.to_string(),
    }
}
