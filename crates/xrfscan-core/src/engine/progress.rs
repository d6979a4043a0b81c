#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    Background,
    Smoothing,
    ScatterSearch,
    PeakSearch,
    LineMatching,
}

impl AnalysisStage {
    pub fn label(self) -> &'static str {
        match self {
            AnalysisStage::Background => "background subtraction",
            AnalysisStage::Smoothing => "smoothing",
            AnalysisStage::ScatterSearch => "scatter-peak search",
            AnalysisStage::PeakSearch => "fluorescence-peak search",
            AnalysisStage::LineMatching => "line matching",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Progress {
    StageStart { stage: AnalysisStage },
    StageFinish { stage: AnalysisStage },
    PeaksFound { count: usize },
    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
