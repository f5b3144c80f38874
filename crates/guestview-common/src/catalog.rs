//! The fixed catalog of guest lifecycle and interaction events that are
//! forwarded to the embedder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every guest event forwarded to the current embedder.
///
/// The wire name of each variant is its kebab-case spelling
/// (`DidFailProvisionalLoad` is `did-fail-provisional-load`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuestEvent {
    // -- Attachment --
    TabReplacedAt,
    DidAttach,
    SetWindow,
    GuestCreated,
    GuestReady,
    WillDetach,
    DidDetach,

    // -- Loading / navigation --
    LoadStart,
    DidFinishLoad,
    DidFailProvisionalLoad,
    DidFailLoad,
    DomReady,
    DidNavigate,
    DidNavigateInPage,
    UpdateTargetUrl,
    RepostFormWarning,

    // -- Page state --
    PreferredSizeChanged,
    ConsoleMessage,
    SecurityStyleChanged,
    PageFaviconUpdated,
    EnterHtmlFullScreen,
    LeaveHtmlFullScreen,
    MediaStartedPlaying,
    MediaPaused,
    FoundInPage,
    DidChangeThemeColor,
    ContextMenu,
    EnablePepperMenu,
    ContentBlocked,

    // -- Autofill --
    ShowAutofillSettings,
    UpdateAutofillPopupDataListValues,
    HideAutofillPopup,
    ShowAutofillPopup,

    // -- Insecure content --
    DidRunInsecureContent,
    DidBlockRunInsecureContent,

    // -- Crashes / teardown --
    Close,
    GpuCrashed,
    PluginCrashed,
    WillDestroy,
    Destroyed,
}

impl GuestEvent {
    /// All catalog events.
    pub const ALL: [GuestEvent; 40] = [
        GuestEvent::TabReplacedAt,
        GuestEvent::DidAttach,
        GuestEvent::SetWindow,
        GuestEvent::GuestCreated,
        GuestEvent::GuestReady,
        GuestEvent::WillDetach,
        GuestEvent::DidDetach,
        GuestEvent::LoadStart,
        GuestEvent::DidFinishLoad,
        GuestEvent::DidFailProvisionalLoad,
        GuestEvent::DidFailLoad,
        GuestEvent::DomReady,
        GuestEvent::DidNavigate,
        GuestEvent::DidNavigateInPage,
        GuestEvent::UpdateTargetUrl,
        GuestEvent::RepostFormWarning,
        GuestEvent::PreferredSizeChanged,
        GuestEvent::ConsoleMessage,
        GuestEvent::SecurityStyleChanged,
        GuestEvent::PageFaviconUpdated,
        GuestEvent::EnterHtmlFullScreen,
        GuestEvent::LeaveHtmlFullScreen,
        GuestEvent::MediaStartedPlaying,
        GuestEvent::MediaPaused,
        GuestEvent::FoundInPage,
        GuestEvent::DidChangeThemeColor,
        GuestEvent::ContextMenu,
        GuestEvent::EnablePepperMenu,
        GuestEvent::ContentBlocked,
        GuestEvent::ShowAutofillSettings,
        GuestEvent::UpdateAutofillPopupDataListValues,
        GuestEvent::HideAutofillPopup,
        GuestEvent::ShowAutofillPopup,
        GuestEvent::DidRunInsecureContent,
        GuestEvent::DidBlockRunInsecureContent,
        GuestEvent::Close,
        GuestEvent::GpuCrashed,
        GuestEvent::PluginCrashed,
        GuestEvent::WillDestroy,
        GuestEvent::Destroyed,
    ];

    /// The event name as emitted by the guest and forwarded to the embedder.
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestEvent::TabReplacedAt => "tab-replaced-at",
            GuestEvent::DidAttach => "did-attach",
            GuestEvent::SetWindow => "set-window",
            GuestEvent::GuestCreated => "guest-created",
            GuestEvent::GuestReady => "guest-ready",
            GuestEvent::WillDetach => "will-detach",
            GuestEvent::DidDetach => "did-detach",
            GuestEvent::LoadStart => "load-start",
            GuestEvent::DidFinishLoad => "did-finish-load",
            GuestEvent::DidFailProvisionalLoad => "did-fail-provisional-load",
            GuestEvent::DidFailLoad => "did-fail-load",
            GuestEvent::DomReady => "dom-ready",
            GuestEvent::DidNavigate => "did-navigate",
            GuestEvent::DidNavigateInPage => "did-navigate-in-page",
            GuestEvent::UpdateTargetUrl => "update-target-url",
            GuestEvent::RepostFormWarning => "repost-form-warning",
            GuestEvent::PreferredSizeChanged => "preferred-size-changed",
            GuestEvent::ConsoleMessage => "console-message",
            GuestEvent::SecurityStyleChanged => "security-style-changed",
            GuestEvent::PageFaviconUpdated => "page-favicon-updated",
            GuestEvent::EnterHtmlFullScreen => "enter-html-full-screen",
            GuestEvent::LeaveHtmlFullScreen => "leave-html-full-screen",
            GuestEvent::MediaStartedPlaying => "media-started-playing",
            GuestEvent::MediaPaused => "media-paused",
            GuestEvent::FoundInPage => "found-in-page",
            GuestEvent::DidChangeThemeColor => "did-change-theme-color",
            GuestEvent::ContextMenu => "context-menu",
            GuestEvent::EnablePepperMenu => "enable-pepper-menu",
            GuestEvent::ContentBlocked => "content-blocked",
            GuestEvent::ShowAutofillSettings => "show-autofill-settings",
            GuestEvent::UpdateAutofillPopupDataListValues => {
                "update-autofill-popup-data-list-values"
            }
            GuestEvent::HideAutofillPopup => "hide-autofill-popup",
            GuestEvent::ShowAutofillPopup => "show-autofill-popup",
            GuestEvent::DidRunInsecureContent => "did-run-insecure-content",
            GuestEvent::DidBlockRunInsecureContent => "did-block-run-insecure-content",
            GuestEvent::Close => "close",
            GuestEvent::GpuCrashed => "gpu-crashed",
            GuestEvent::PluginCrashed => "plugin-crashed",
            GuestEvent::WillDestroy => "will-destroy",
            GuestEvent::Destroyed => "destroyed",
        }
    }

    /// Look up a catalog event by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|e| e.as_str() == name)
    }

    /// Whether this is the guest's own terminal teardown event. It is
    /// delivered even after the guest reports itself destroyed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GuestEvent::Destroyed)
    }
}

impl fmt::Display for GuestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a name that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown guest event: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for GuestEvent {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownEvent(s.to_string()))
    }
}
