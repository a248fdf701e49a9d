use axum::response::IntoResponse;
use maud::{html, Markup, Render, DOCTYPE};

use crate::{icons, mercado_pago::PixQrCode};

pub fn layout(title: &str, main_content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta http-equiv="X-UA-Compatible" content="ie=edge";
                title {(title)}
                script src="https://cdn.tailwindcss.com" {}
            }
            body ."bg-gray-100"."min-h-screen"."flex"."items-center"."justify-center" {
                main ."bg-white"."rounded-lg"."shadow-md"."p-6"."m-4"."w-full"."max-w-md" {
                    (main_content)
                }
                script src="/pix.js" {}
            }
        }
    }
}

/// Checkout page showing the PIX QR code for a single product.
pub struct PixCheckoutPage<'a> {
    pub nome: &'a str,
    pub preco: &'a str,
    pub qr: &'a PixQrCode,
}

impl Render for PixCheckoutPage<'_> {
    fn render(&self) -> Markup {
        layout(
            "Pagamento PIX",
            html! {
                header ."flex"."items-center"."gap-2"."text-teal-600"."mb-4" {
                    (icons::pix())
                    h1 ."text-2xl"."font-bold" {"Pagamento via PIX"}
                }
                p ."text-gray-700" { "Produto: " span #"produto-nome" ."font-semibold" {(self.nome)} }
                p ."text-gray-700"."mb-4" { "Valor: R$ " span #"produto-preco" ."font-semibold" {(self.preco)} }
                img #"qr-code-img" ."mx-auto"."w-64"."h-64"
                    src={"data:image/png;base64,"(self.qr.qr_code_base64)}
                    alt="QR code para pagamento PIX";
                p ."text-sm"."text-gray-500"."text-center"."my-2" {"Escaneie o QR code com o app do seu banco ou use o código abaixo."}
                ."flex"."gap-2" {
                    input #"pix-code" ."flex-1"."border"."rounded"."px-2"."py-1"."text-xs"
                        type="text" readonly value=(self.qr.qr_code);
                    button #"copy-pix-code" ."flex"."items-center"."gap-1"."bg-teal-600"."text-white"."rounded"."px-3"."py-1"
                        type="button" data-target="pix-code" {
                        (icons::copy()) span {"Copiar"}
                    }
                }
                @if let Some(ticket_url) = &self.qr.ticket_url {
                    a ."block"."text-center"."text-teal-700"."underline"."mt-4" href=(ticket_url) target="_blank" rel="noopener" {
                        "Abrir pagamento no Mercado Pago"
                    }
                }
                a ."block"."text-center"."text-gray-600"."mt-4" href="/" {"Voltar para os produtos"}
            },
        )
    }
}

impl IntoResponse for PixCheckoutPage<'_> {
    fn into_response(self) -> axum::response::Response {
        self.render().into_response()
    }
}
