use crate::graph::node::GraphNode;

/// Factory for creating voices with a specific patch/sound design
///
/// Configure the sound once; PolySynth uses the factory to build identical
/// voices up front.
pub trait VoiceFactory: Send {
    type Voice: GraphNode;

    fn create_voice(&self) -> Self::Voice;
}

impl<F, T> VoiceFactory for F
where
    F: Fn() -> T + Send,
    T: GraphNode,
{
    type Voice = T;

    fn create_voice(&self) -> Self::Voice {
        self()
    }
}
