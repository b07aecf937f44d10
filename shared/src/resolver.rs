use crate::placeholder::placeholder_data_url;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageNaming {
    /// `page-3`
    Prefixed,
    /// `3`
    Bare,
    /// `Page-3`
    Capitalized,
    /// `PAGE-3`
    Uppercase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidateTemplate {
    pub naming: PageNaming,
    pub extension: &'static str,
}

impl CandidateTemplate {
    const fn new(naming: PageNaming, extension: &'static str) -> Self {
        Self { naming, extension }
    }

    pub fn file_name(&self, page: u32) -> String {
        let stem = match self.naming {
            PageNaming::Prefixed => format!("page-{page}"),
            PageNaming::Bare => page.to_string(),
            PageNaming::Capitalized => format!("Page-{page}"),
            PageNaming::Uppercase => format!("PAGE-{page}"),
        };
        format!("{stem}.{}", self.extension)
    }
}

/// Naming conventions in the order they are tried.
pub const CANDIDATE_TEMPLATES: [CandidateTemplate; 8] = [
    CandidateTemplate::new(PageNaming::Prefixed, "jpg"),
    CandidateTemplate::new(PageNaming::Bare, "jpg"),
    CandidateTemplate::new(PageNaming::Prefixed, "jpeg"),
    CandidateTemplate::new(PageNaming::Bare, "jpeg"),
    CandidateTemplate::new(PageNaming::Prefixed, "png"),
    CandidateTemplate::new(PageNaming::Bare, "png"),
    CandidateTemplate::new(PageNaming::Capitalized, "jpg"),
    CandidateTemplate::new(PageNaming::Uppercase, "JPG"),
];

pub fn candidate_paths(base_path: &str, year: &str, page: u32) -> Vec<String> {
    let base = base_path.trim_end_matches('/');
    let mut paths: Vec<String> = Vec::with_capacity(CANDIDATE_TEMPLATES.len());
    for template in &CANDIDATE_TEMPLATES {
        let path = if base.is_empty() {
            format!("{year}/{}", template.file_name(page))
        } else {
            format!("{base}/{year}/{}", template.file_name(page))
        };
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Location shown to the user when every candidate failed.
pub fn expected_path(year: &str, page: u32) -> String {
    format!("pdf/{year}/{}", CANDIDATE_TEMPLATES[0].file_name(page))
}

#[derive(Debug)]
pub enum ProbeResult<T> {
    Loaded(T),
    Failed,
    TimedOut,
}

/// One image load attempt. Implementations must resolve (never hang) within
/// their own timeout.
#[allow(async_fn_in_trait)]
pub trait ImageProbe {
    type Loaded;

    async fn probe(&mut self, path: &str) -> ProbeResult<Self::Loaded>;
}

#[derive(Debug)]
pub enum Resolution<T> {
    Found {
        path: String,
        image: T,
        attempts: usize,
    },
    Placeholder {
        data_url: String,
        attempts: usize,
    },
}

impl<T> Resolution<T> {
    pub fn attempts(&self) -> usize {
        match self {
            Resolution::Found { attempts, .. } | Resolution::Placeholder { attempts, .. } => {
                *attempts
            }
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Resolution::Placeholder { .. })
    }
}

/// Tries every candidate for `(year, page)` one after another and stops at the
/// first that loads. Exhausting the list yields the generated placeholder.
pub async fn resolve_page<P: ImageProbe>(
    probe: &mut P,
    base_path: &str,
    year: &str,
    page: u32,
) -> Resolution<P::Loaded> {
    let candidates = candidate_paths(base_path, year, page);
    let total = candidates.len();
    for (index, path) in candidates.into_iter().enumerate() {
        log::debug!("trying path {}/{total}: {path}", index + 1);
        match probe.probe(&path).await {
            ProbeResult::Loaded(image) => {
                log::info!("page {page} of {year} loaded from {path}");
                return Resolution::Found {
                    path,
                    image,
                    attempts: index + 1,
                };
            }
            ProbeResult::Failed => log::debug!("failed with path: {path}"),
            ProbeResult::TimedOut => log::debug!("timed out on path: {path}"),
        }
    }
    log::warn!("image not found for page {page} of year {year}");
    Resolution::Placeholder {
        data_url: placeholder_data_url(year, page),
        attempts: total,
    }
}
