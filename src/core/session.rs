use crate::domain::model::{Diagnosis, ImageRef};
use crate::utils::error::{CropCareError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    ImagePicked {
        image: ImageRef,
    },
    Analyzing {
        image: ImageRef,
    },
    ResultReady {
        image: ImageRef,
        diagnosis: Diagnosis,
        dialog_visible: bool,
    },
    Failed {
        image: ImageRef,
        notice: String,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::ImagePicked { .. } => "image_picked",
            SessionState::Analyzing { .. } => "analyzing",
            SessionState::ResultReady { .. } => "result_ready",
            SessionState::Failed { .. } => "failed",
        }
    }
}

/// State of the single analysis screen. Only one analysis may be in flight.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    state: SessionState,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::Analyzing { .. })
    }

    pub fn image(&self) -> Option<&ImageRef> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::ImagePicked { image }
            | SessionState::Analyzing { image }
            | SessionState::ResultReady { image, .. }
            | SessionState::Failed { image, .. } => Some(image),
        }
    }

    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        match &self.state {
            SessionState::ResultReady { diagnosis, .. } => Some(diagnosis),
            _ => None,
        }
    }

    pub fn dialog_visible(&self) -> bool {
        matches!(
            self.state,
            SessionState::ResultReady {
                dialog_visible: true,
                ..
            }
        )
    }

    pub fn notice(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { notice, .. } => Some(notice),
            _ => None,
        }
    }

    /// 選新圖片會清掉舊結果並關閉對話框
    pub fn pick_image(&mut self, image: ImageRef) -> Result<()> {
        if self.is_busy() {
            return Err(CropCareError::SessionBusy);
        }
        tracing::debug!("Image picked: {}", image.uri);
        self.state = SessionState::ImagePicked { image };
        Ok(())
    }

    /// Enters `Analyzing` and returns the image to analyze.
    pub fn begin_analysis(&mut self) -> Result<ImageRef> {
        let image = match &self.state {
            SessionState::Idle => return Err(CropCareError::NoImageSelected),
            SessionState::Analyzing { .. } => return Err(CropCareError::SessionBusy),
            SessionState::ImagePicked { image }
            | SessionState::ResultReady { image, .. }
            | SessionState::Failed { image, .. } => image.clone(),
        };

        self.state = SessionState::Analyzing {
            image: image.clone(),
        };
        Ok(image)
    }

    pub fn complete(&mut self, diagnosis: Diagnosis) -> Result<()> {
        let image = self.take_analyzing_image("complete")?;
        self.state = SessionState::ResultReady {
            image,
            diagnosis,
            dialog_visible: true,
        };
        Ok(())
    }

    pub fn fail(&mut self, notice: impl Into<String>) -> Result<()> {
        let image = self.take_analyzing_image("fail")?;
        self.state = SessionState::Failed {
            image,
            notice: notice.into(),
        };
        Ok(())
    }

    /// Abandons the in-flight analysis; the picked image stays selected.
    pub fn cancel(&mut self) -> Result<()> {
        let image = self.take_analyzing_image("cancel")?;
        self.state = SessionState::ImagePicked { image };
        Ok(())
    }

    pub fn dismiss_dialog(&mut self) {
        if let SessionState::ResultReady { dialog_visible, .. } = &mut self.state {
            *dialog_visible = false;
        }
    }

    fn take_analyzing_image(&self, transition: &'static str) -> Result<ImageRef> {
        match &self.state {
            SessionState::Analyzing { image } => Ok(image.clone()),
            other => Err(CropCareError::InvalidTransition {
                transition,
                state: other.name(),
            }),
        }
    }
}
