use burn::{
    nn::gru::{Gru, GruConfig},
    prelude::*,
    tensor::activation::softmax,
};

/// Unscaled dot-product attention without trainable weights.
///
/// query: [batch, Tq, d], key: [batch, Tv, d], value: [batch, Tv, dv]
/// → [batch, Tq, dv]
pub fn dot_product_attention<B: Backend>(
    query: Tensor<B, 3>,
    value: Tensor<B, 3>,
    key:   Tensor<B, 3>,
) -> Tensor<B, 3> {
    let scores  = query.matmul(key.swap_dims(1, 2)); // [batch, Tq, Tv]
    let weights = softmax(scores, 2);
    weights.matmul(value)
}

#[derive(Config, Debug)]
pub struct BiGruConfig {
    pub d_input:  usize,
    pub d_hidden: usize,
}

impl BiGruConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> BiGru<B> {
        BiGru {
            forward_gru:  GruConfig::new(self.d_input, self.d_hidden, true).init(device),
            backward_gru: GruConfig::new(self.d_input, self.d_hidden, true).init(device),
            d_hidden:     self.d_hidden,
        }
    }
}

/// Two GRUs over opposite time directions, outputs concatenated per step.
#[derive(Module, Debug)]
pub struct BiGru<B: Backend> {
    pub forward_gru:  Gru<B>,
    pub backward_gru: Gru<B>,
    pub d_hidden:     usize,
}

impl<B: Backend> BiGru<B> {
    /// x: [batch, seq_len, d_input] → [batch, seq_len, 2 * d_hidden]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let fwd = self.forward_gru.forward(x.clone(), None);
        // run over reversed time, then flip back so step t lines up with fwd
        let bwd = self.backward_gru.forward(x.flip([1]), None).flip([1]);
        Tensor::cat(vec![fwd, bwd], 2)
    }

    pub fn output_size(&self) -> usize {
        2 * self.d_hidden
    }
}
